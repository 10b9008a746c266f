//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Resolved addresses + router
//!     → listener.rs (one task per address: announce, bind, serve)
//!     → first error from any task → returned to the caller
//!                                 → shutdown triggered for the rest
//! ```

pub mod listener;

pub use listener::{listen_and_serve, listen_and_serve_with_shutdown, LogSink, ServeError};
