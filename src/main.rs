//! Webhook Command Bot - Main Entry Point
//!
//! Serves the Telegram webhook and answers registered slash commands.
//! Also carries one-shot flags for managing the webhook and command menu.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use webhook_command_bot::commands::{CommandRegistry, HelpCommand, InfoCommand};
use webhook_command_bot::config::{BotSettings, TelegramConfig};
use webhook_command_bot::dispatch::Dispatcher;
use webhook_command_bot::server::{WebhookState, webhook_router};
use webhook_command_bot::telegram::{BotApi, command_menu};

/// Telegram bot answering slash commands over a webhook.
#[derive(Parser, Debug)]
#[command(name = "webhook_bot")]
#[command(about = "Serve a Telegram webhook that routes slash commands to handlers")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Register this public URL as the webhook and exit.
    #[arg(long, value_name = "URL")]
    set_webhook: Option<String>,

    /// Remove the webhook and exit.
    #[arg(long)]
    delete_webhook: bool,

    /// Print the current webhook status and exit.
    #[arg(long)]
    webhook_info: bool,

    /// Publish the registered commands as the bot's command menu and exit.
    #[arg(long)]
    publish_commands: bool,

    /// Print the command menu currently published on the platform and exit.
    #[arg(long)]
    show_commands: bool,
}

impl Args {
    const fn is_admin_action(&self) -> bool {
        self.set_webhook.is_some()
            || self.delete_webhook
            || self.webhook_info
            || self.publish_commands
            || self.show_commands
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let settings = BotSettings::from_env_with_defaults();
    let registry = build_registry().await;

    if args.is_admin_action() {
        let tg_config = TelegramConfig::from_env()
            .context("Failed to load Telegram configuration from environment")?;
        return run_admin(&args, &settings, &tg_config, &registry).await;
    }

    let dispatcher = Dispatcher::new(Arc::clone(&registry))
        .with_mention_policy(settings.mention_policy());
    let state = WebhookState::new(Arc::new(dispatcher), settings.webhook_secret.clone());
    let app = webhook_router(state, &settings.webhook_path);

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid BIND_ADDR: {}", settings.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        "Serving webhook on {}{} ({} commands)",
        addr,
        settings.webhook_path,
        registry.len().await
    );
    if settings.webhook_secret.is_none() {
        info!("No WEBHOOK_SECRET set; accepting unauthenticated webhook calls");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, shutting down..."),
                Err(e) => warn!("Failed to listen for Ctrl+C ({}); shutting down", e),
            }
        })
        .await
        .context("Webhook server failed")?;

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Registers every built-in command.
async fn build_registry() -> Arc<CommandRegistry> {
    let registry = Arc::new(CommandRegistry::new());
    registry.register_handler(Arc::new(InfoCommand)).await;
    registry
        .register_handler(Arc::new(HelpCommand::new(Arc::downgrade(&registry))))
        .await;
    registry
}

/// Runs the one-shot Bot API management actions selected on the command line.
async fn run_admin(
    args: &Args,
    settings: &BotSettings,
    tg_config: &TelegramConfig,
    registry: &CommandRegistry,
) -> Result<()> {
    let api = BotApi::new(tg_config);

    let me = api.get_me().await.context("Failed to reach the Bot API")?;
    info!(
        "Authorized as @{} (id {})",
        me.username.as_deref().unwrap_or("unknown"),
        me.id
    );

    if args.delete_webhook {
        api.delete_webhook(false)
            .await
            .context("Failed to delete webhook")?;
        println!("✓ Webhook removed");
    }

    if let Some(url) = &args.set_webhook {
        api.set_webhook(url, settings.webhook_secret.as_deref())
            .await
            .context("Failed to set webhook")?;
        println!("✓ Webhook set to: {url}");
    }

    if args.publish_commands {
        let menu = command_menu(registry).await;
        api.set_my_commands(&menu)
            .await
            .context("Failed to publish command menu")?;
        println!("✓ Published {} commands:", menu.len());
        for spec in &menu {
            println!("  /{} - {}", spec.command, spec.description);
        }
    }

    if args.show_commands {
        let published = api
            .get_my_commands()
            .await
            .context("Failed to get published commands")?;
        println!("Published commands ({}):", published.len());
        for spec in &published {
            println!("  /{} - {}", spec.command, spec.description);
        }
    }

    if args.webhook_info {
        let info = api
            .get_webhook_info()
            .await
            .context("Failed to get webhook info")?;
        let url = if info.url.is_empty() { "(none)" } else { info.url.as_str() };
        println!("Webhook URL:     {url}");
        println!("Pending updates: {}", info.pending_update_count);
        if let Some(message) = &info.last_error_message {
            println!("Last error:      {message}");
        }
    }

    Ok(())
}
