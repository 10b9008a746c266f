//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → every listener's ShutdownSignal resolves → axum drains → task exits
//!
//! Signals (signals.rs):
//!     SIGINT → Shutdown::trigger()
//! ```
//!
//! # Design Decisions
//! - One coordinator per listener set
//! - The first listener failure triggers the coordinator so siblings stop too

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
