//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl+C (SIGINT) into a shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A handler that cannot be installed never fires instead of failing startup

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C.
pub async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Trigger `shutdown` on Ctrl+C from a background task.
pub fn trigger_on_ctrl_c(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        ctrl_c().await;
        shutdown.trigger();
    })
}
