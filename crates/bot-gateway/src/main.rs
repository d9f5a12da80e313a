//! Gateway bot entry point
//!
//! Run with:
//! ```bash
//! BOT_TOKEN=... cargo run -p bot-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use bot_common::{try_init_tracing_with_config, BotConfig, TracingConfig};
use bot_gateway::events::ReadyEvent;
use bot_gateway::{GatewayClient, GatewayEventType};
use bot_rest::Message;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format can follow APP_ENV
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Gateway bot stopped");
        std::process::exit(1);
    }
}

async fn run(config: BotConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        env = ?config.env,
        intents = %config.intents,
        gateway_version = config.gateway_version,
        "Starting gateway bot"
    );

    let mut client = GatewayClient::new(config)?;

    client.on(GatewayEventType::Ready, |payload| {
        match serde_json::from_value::<ReadyEvent>(payload) {
            Ok(ready) => info!(
                user = %ready.user.username,
                user_id = %ready.user.id,
                guilds = ready.guilds.len(),
                "Bot is ready"
            ),
            Err(e) => warn!(error = %e, "Unexpected READY payload"),
        }
    });

    let rest = client.rest().clone();
    client.on(GatewayEventType::MessageCreate, move |payload| {
        let message: Message = match serde_json::from_value(payload) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Unexpected MESSAGE_CREATE payload");
                return;
            }
        };

        info!(
            channel_id = %message.channel_id,
            message_id = %message.id,
            "Message received"
        );

        let from_bot = message.author.as_ref().is_some_and(|a| a.bot);
        if message.content == "!ping" && !from_bot {
            let rest = rest.clone();
            tokio::spawn(async move {
                if let Err(e) = rest.messages().reply(&message, "Pong!").await {
                    warn!(error = %e, "Failed to reply");
                }
            });
        }
    });

    client.on_error(|e| warn!(error = %e, "Gateway error"));

    client.login().await?;

    tokio::select! {
        result = client.wait() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            client.disconnect().await?;
        }
    }

    Ok(())
}
