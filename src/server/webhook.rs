//! Webhook HTTP handler.
//!
//! Decodes the pushed update, runs it through the dispatcher and answers
//! with either the reply instruction or a bare acknowledgement.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::update::Update;

/// Header the platform uses to echo the secret set with `setWebhook`.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state for webhook handlers.
#[derive(Debug, Clone)]
pub struct WebhookState {
    dispatcher: Arc<Dispatcher>,

    /// Expected secret header value; `None` disables the check.
    secret: Option<Arc<str>>,
}

impl WebhookState {
    /// Creates webhook state around a dispatcher.
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>, secret: Option<String>) -> Self {
        Self {
            dispatcher,
            secret: secret.map(Arc::from),
        }
    }
}

/// Creates the webhook router.
///
/// `path` must start with `/`.
pub fn webhook_router(state: WebhookState, path: &str) -> Router {
    Router::new()
        .route(path, post(receive_update))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

fn acknowledge() -> Response {
    Json(json!({ "ok": true })).into_response()
}

/// Receives one pushed update.
async fn receive_update(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(expected) = &state.secret {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if provided != expected.as_ref() {
            warn!("Rejected webhook call with missing or wrong secret token");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid secret token" })),
            )
                .into_response();
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Failed to decode update: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON" })),
            )
                .into_response();
        }
    };

    match state.dispatcher.dispatch(&update).await {
        Ok(DispatchOutcome::Reply(reply)) => Json(reply).into_response(),
        Ok(DispatchOutcome::NoAction(reason)) => {
            debug!("Update {}: no action ({:?})", update.update_id, reason);
            acknowledge()
        }
        Err(e) => {
            // Still acknowledge so the platform does not redeliver.
            error!("Update {}: {}", update.update_id, e);
            acknowledge()
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::commands::{CommandHandler, CommandRegistry, HandlerError, InfoCommand};
    use crate::dispatch::ReplyInstruction;

    struct Broken;

    #[async_trait]
    impl CommandHandler for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "fails"
        }

        async fn execute(&self, _: &Update, _: &[String]) -> Result<Option<ReplyInstruction>, HandlerError> {
            Err(HandlerError::Other(anyhow::anyhow!("backend down")))
        }
    }

    async fn app(secret: Option<&str>) -> Router {
        let registry = Arc::new(CommandRegistry::new());
        registry.register_handler(Arc::new(InfoCommand)).await;
        registry.register_handler(Arc::new(Broken)).await;
        let dispatcher = Arc::new(Dispatcher::new(registry));
        webhook_router(
            WebhookState::new(dispatcher, secret.map(str::to_owned)),
            "/api/webhook",
        )
    }

    fn update_body(text: &str, command_len: usize) -> String {
        json!({
            "update_id": 1,
            "message": {
                "message_id": 9,
                "from": {"id": 5, "is_bot": false, "first_name": "U"},
                "chat": {"id": 77, "type": "private"},
                "date": 1_700_000_000,
                "text": text,
                "entities": [{"type": "bot_command", "offset": 0, "length": command_len}]
            }
        })
        .to_string()
    }

    fn post_update(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/webhook")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(None)
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_command_returns_reply_instruction() {
        let response = app(None)
            .await
            .oneshot(post_update(update_body("/info", 5)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["method"], "sendMessage");
        assert_eq!(json["chat_id"], 77);
        assert_eq!(json["parse_mode"], "HTML");
    }

    #[tokio::test]
    async fn test_unknown_command_acknowledges() {
        let response = app(None)
            .await
            .oneshot(post_update(update_body("/nothing", 8)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_handler_failure_still_acknowledges() {
        let response = app(None)
            .await
            .oneshot(post_update(update_body("/broken", 7)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let response = app(None)
            .await
            .oneshot(post_update("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Invalid JSON"}));
    }

    #[tokio::test]
    async fn test_secret_token_is_enforced() {
        let app = app(Some("s3cret")).await;

        let response = app
            .clone()
            .oneshot(post_update(update_body("/info", 5)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut request = post_update(update_body("/info", 5));
        request
            .headers_mut()
            .insert(SECRET_TOKEN_HEADER, "s3cret".parse().unwrap());
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["chat_id"], 77);
    }
}
