//! Listen configuration resolution and multi-address serving for axum routers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod resolve;

pub use config::PrecedenceSpec;
pub use lifecycle::Shutdown;
pub use net::{listen_and_serve, listen_and_serve_with_shutdown, LogSink, ServeError};
pub use resolve::{resolve, ResolveError, Resolved, Resolver};
