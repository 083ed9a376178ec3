//! medalbot - IRC medal bot.

use medalbot::config::{Config, validate};
use medalbot::network::{self, Session};
use medalbot::state::{AdminList, MedalStore};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.address(),
        nick = %config.server.nick,
        channel = %config.channel.name,
        "Starting medalbot"
    );

    let admins = AdminList::load(&config.files.admins)?;
    let medals = MedalStore::open(&config.files.medals).map_err(|e| {
        error!(error = %e, code = e.error_code(), "Failed to load medal list");
        e
    })?;
    info!(admins = admins.len(), medals = medals.len(), "State loaded");

    let session = Session::from_config(&config, medals, admins);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested");
                signal_token.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    network::run(&config, session, shutdown).await?;
    info!("Bot stopped");
    Ok(())
}
