//! Webhook HTTP transport.
//!
//! Receives updates pushed by the platform and serializes dispatch results
//! back as the response body.

mod webhook;

pub use webhook::{SECRET_TOKEN_HEADER, WebhookState, webhook_router};
