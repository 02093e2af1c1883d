use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ampbot_gateway::amp::AmpClient;
use ampbot_gateway::command::Dispatcher;
use ampbot_gateway::commands::builtin_registry;
use ampbot_gateway::discord::start_discord_bot;
use ampbot_gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so the configured level can seed the filter
    let config = ampbot_core::Config::load()?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.settings.logging.level.as_str().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let amp_url = config.amp_base_url();
    info!("Configuration loaded (AMP panel at {})", amp_url);

    let amp = AmpClient::new(
        amp_url,
        config.amp_username(),
        config.amp_password(),
        config.settings.amp.request_timeout(),
    )?;
    let registry = builtin_registry(Arc::new(amp))?;
    info!("Registered {} commands", registry.len());

    let dispatcher = Dispatcher::new(registry, config.settings.commands.timeout());
    let state = Arc::new(AppState::new(
        dispatcher,
        config.command_prefix(),
        config.settings.discord.clone(),
    ));

    let mut client = start_discord_bot(config.discord_bot_token(), state).await?;
    info!("Discord bot started");

    client.start().await?;
    Ok(())
}
