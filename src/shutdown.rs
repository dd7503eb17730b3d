// src/shutdown.rs

//! Termination signal handling.

use tracing::info;

use crate::errors::Result;

/// Resolve once SIGINT or SIGTERM is received.
#[cfg(unix)]
pub async fn wait_for_signal() -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("received SIGTERM, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            info!("received SIGINT, initiating graceful shutdown");
        }
    }

    Ok(())
}

/// Resolve once Ctrl-C is received.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("received Ctrl-C, initiating graceful shutdown");
    Ok(())
}
