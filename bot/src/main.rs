use std::sync::Arc;

use dotenv::dotenv;
use personality_bot::{
    config::BotConfig,
    discord::{agent::GeminiGenerator, bot::DiscordEventHandler, commands::BotState},
};
use serenity::all::GatewayIntents;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // LOG_FORMAT=json for structured logs in production
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), eyre::Error> {
    dotenv().ok();
    init_tracing();

    let config = BotConfig::new_from_env().inspect_err(|e| {
        tracing::error!("Invalid configuration: {e}");
    })?;
    tracing::info!(?config, "Loaded configuration");

    let generator = Arc::new(GeminiGenerator::new(
        &config.gemini_api_key,
        &config.gemini_model,
    ));
    let handler = DiscordEventHandler::new(BotState::new(generator), config.status.clone());

    // Slash commands need no privileged intents
    let mut client = serenity::Client::builder(&config.discord_token, GatewayIntents::non_privileged())
        .event_handler(handler)
        .await?;

    client.start().await?;
    Ok(())
}
