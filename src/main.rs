//! Bistro - A Terminal UI for GoRestaurant
//!
//! Lists orders and favorite dishes served by a GoRestaurant API.

use anyhow::Context;
use bistro::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load_or_default().context("failed to load configuration")?;

    // Log to a file; stdout belongs to the terminal UI
    let log_dir = bistro::config::log_dir().context("failed to resolve log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "bistro.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bistro=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting bistro");

    // Run the application
    let mut app = App::new(config).context("failed to start")?;
    app.run().await?;

    tracing::info!("Bye");
    Ok(())
}
