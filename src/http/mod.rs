//! HTTP handler plumbing.
//!
//! # Data Flow
//! ```text
//! caller's axum Router
//!     → prefix.rs (mount under the resolved root, or pass through for `/`)
//!     → net::listener (one axum::serve per address, shared router)
//! ```

pub mod prefix;

pub use prefix::{mount, normalize_root, RootPrefix};
