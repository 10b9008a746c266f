//! Listener bootstrap.
//!
//! # Responsibilities
//! - Spawn one task per resolved address, all before waiting
//! - Announce each address on the optional log sink before binding
//! - Bind a TCP listener and run the axum serve loop with the shared router
//! - Return the first failure reported by any listener
//!
//! # Design Decisions
//! - Failures travel over a channel with one slot per address, so no task blocks
//! - The first failure triggers the shutdown coordinator; siblings drain and stop
//! - Listeners that never fail never signal, so a healthy set waits forever

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use crate::lifecycle::{Shutdown, ShutdownSignal};
use crate::resolve::address::{join_host_port, split_host_port};

/// Shared writer receiving one `Listening on <address>` line per listener.
pub type LogSink = Arc<Mutex<dyn Write + Send>>;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("no addresses to listen on")]
    NoAddresses,

    #[error("failed to bind {address}: {source}")]
    Bind { address: String, source: io::Error },

    #[error("serving {address} failed: {source}")]
    Serve { address: String, source: io::Error },
}

impl ServeError {
    /// Address of the listener that failed, if any.
    pub fn address(&self) -> Option<&str> {
        match self {
            ServeError::NoAddresses => None,
            ServeError::Bind { address, .. } | ServeError::Serve { address, .. } => Some(address),
        }
    }
}

/// Serve `handler` on every address until the first listener fails.
pub async fn listen_and_serve(
    addresses: &[String],
    handler: Router,
    log: Option<LogSink>,
) -> Result<(), ServeError> {
    listen_and_serve_with_shutdown(addresses, handler, log, &Shutdown::new()).await
}

/// Like [`listen_and_serve`], stopping every listener when `shutdown` triggers.
///
/// Returns `Ok(())` once all listeners stopped cleanly after a shutdown.
pub async fn listen_and_serve_with_shutdown(
    addresses: &[String],
    handler: Router,
    log: Option<LogSink>,
    shutdown: &Shutdown,
) -> Result<(), ServeError> {
    if addresses.is_empty() {
        return Err(ServeError::NoAddresses);
    }

    let (tx, mut rx) = mpsc::channel(addresses.len());
    for address in addresses {
        let tx = tx.clone();
        let task = listen(
            address.clone(),
            handler.clone(),
            log.clone(),
            shutdown.subscribe(),
        );
        tokio::spawn(async move {
            if let Err(err) = task.await {
                tracing::error!(error = %err, "Listener failed");
                let _ = tx.send(err).await;
            }
        });
    }
    drop(tx);

    match rx.recv().await {
        Some(err) => {
            shutdown.trigger();
            Err(err)
        }
        None => Ok(()),
    }
}

async fn listen(
    address: String,
    app: Router,
    log: Option<LogSink>,
    signal: ShutdownSignal,
) -> Result<(), ServeError> {
    if let Some(log) = &log {
        announce(log, &address);
    }

    let listener = match bind(&address).await {
        Ok(listener) => listener,
        Err(source) => return Err(ServeError::Bind { address, source }),
    };

    tracing::info!(
        address = %address,
        local_addr = ?listener.local_addr().ok(),
        "Listener bound"
    );

    let served = axum::serve(listener, app.layer(TraceLayer::new_for_http()))
        .with_graceful_shutdown(signal.recv())
        .await;
    if let Err(source) = served {
        return Err(ServeError::Serve { address, source });
    }

    tracing::info!(address = %address, "Listener stopped");
    Ok(())
}

fn announce(log: &LogSink, address: &str) {
    let mut sink = log.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(err) = writeln!(sink, "Listening on {address}").and_then(|()| sink.flush()) {
        tracing::warn!(error = %err, "Failed to write listen announcement");
    }
}

/// Socket address strings to try, in order, for a resolved `host:port`.
///
/// An empty host means every interface: the IPv6 wildcard first (dual-stack where
/// the system allows it), then the IPv4 wildcard.
fn bind_targets(address: &str) -> Vec<String> {
    match split_host_port(address) {
        Ok(("", port)) => vec![format!("[::]:{port}"), format!("0.0.0.0:{port}")],
        Ok((host, port)) => match port.parse::<u16>() {
            Ok(port) => vec![join_host_port(host, port)],
            Err(_) => vec![address.to_string()],
        },
        Err(_) => vec![address.to_string()],
    }
}

/// Bind the first target that accepts; the last failure is reported otherwise.
async fn bind(address: &str) -> io::Result<TcpListener> {
    let mut last = io::Error::new(io::ErrorKind::InvalidInput, "no bind target");
    for target in bind_targets(address) {
        match TcpListener::bind(target.as_str()).await {
            Ok(listener) => return Ok(listener),
            Err(err) => {
                tracing::debug!(candidate = %target, error = %err, "Bind attempt failed");
                last = err;
            }
        }
    }
    Err(last)
}
