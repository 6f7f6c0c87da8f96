mod command;
mod config;
mod error;
mod mount;
mod server;
mod store;

use anyhow::Context;
use clap::Parser;
use command::CommandExecutor;
use config::{Args, ServerConfig};
use mount::{Mount, SimulatedMount};
use scope_shared::DeviceStatus;
use server::CommandServer;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = ServerConfig::from(Args::parse());

    let store = config.store.open();
    info!("Status store: {}", store.describe());

    if config.reset_status {
        store
            .write(&DeviceStatus::Idling)
            .await
            .context("Failed to reset status record")?;
        info!("Status record reset to idling");
    }

    let mount = Arc::new(SimulatedMount::new(config.durations));
    info!(
        "Mount: {} (motion {:?}, tracking {:?})",
        mount.name(),
        config.durations.motion,
        config.durations.tracking
    );

    let executor = Arc::new(CommandExecutor::new(store, mount));
    let server = CommandServer::bind(&config, executor)
        .await
        .context("Failed to start command server")?;

    info!("Server listening on {}", server.local_addr()?);
    match config.max_connections {
        Some(n) => info!("  Admission cap: {} concurrent connections", n),
        None => info!("  Admission cap: none"),
    }
    info!("  Max message length: {} bytes", config.max_length);

    server.run().await;
    Ok(())
}
