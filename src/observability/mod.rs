//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resolve, net, http produce:
//!     → tracing events (structured fields: address, port, root, error)
//!     → TraceLayer spans per request while serving
//!
//! Consumers:
//!     → logging.rs (fmt layer on stdout, EnvFilter)
//! ```

pub mod logging;
