//! listen-resolver
//!
//! Resolves where to listen from the environment and the command line, then serves a
//! small router on every resolved address.
//!
//! # Architecture Overview
//!
//! ```text
//!     argv ──────────┐
//!                    ▼
//!     env ──────▶ ┌─────────┐    ┌───────────┐    ┌──────────────┐
//!                 │ resolve │───▶│   http    │───▶│     net      │───▶ N listeners
//!     spec ─────▶ │         │    │  prefix   │    │   listener   │
//!     (TOML)      └─────────┘    └───────────┘    └──────┬───────┘
//!                                                        │ first error
//!                                                        ▼
//!                                                 lifecycle::Shutdown
//! ```
//!
//! # Usage
//!
//! ```text
//! PORT=8080 listen-resolver --addr 127.0.0.1 --addr [::1] --root /app
//! LISTEN_SPEC_FILE=spec.toml listen-resolver --listen-port 8080
//! ```

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use axum::{routing::get, Router};

use listen_resolver::config::load_spec;
use listen_resolver::lifecycle::{signals, Shutdown};
use listen_resolver::net::{listen_and_serve_with_shutdown, LogSink};
use listen_resolver::observability::logging;
use listen_resolver::resolve::{resolve, ResolveError};

/// Environment variable naming an optional TOML precedence spec.
const SPEC_FILE_VAR: &str = "LISTEN_SPEC_FILE";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "listen-resolver failed");
            match err.downcast_ref::<ResolveError>() {
                // clap renders its own `error:` prefix and usage line.
                Some(ResolveError::Arguments(err)) => eprint!("{err}"),
                _ => eprintln!("error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    tracing::info!("listen-resolver v{} starting", env!("CARGO_PKG_VERSION"));

    let spec = match std::env::var_os(SPEC_FILE_VAR) {
        Some(path) => Some(load_spec(Path::new(&path))?),
        None => None,
    };

    let app = Router::new()
        .route("/", get(|| async { "Hello from listen-resolver" }))
        .route("/health", get(|| async { "ok" }));

    let resolved = resolve(std::env::args_os().skip(1), Some(app), spec.as_ref())?;

    tracing::info!(
        addresses = ?resolved.addresses,
        root = %resolved.root,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::trigger_on_ctrl_c(shutdown.clone());

    let log: LogSink = Arc::new(Mutex::new(std::io::stdout()));
    listen_and_serve_with_shutdown(&resolved.addresses, resolved.handler, Some(log), &shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
