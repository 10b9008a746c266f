//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! spec file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PrecedenceSpec (validated, immutable)
//!     → handed to the resolver for one resolution call
//!
//! env.rs
//!     → Environment trait (process environment or a fixed map)
//!     → read by the resolver, never written
//! ```
//!
//! # Design Decisions
//! - A PrecedenceSpec is immutable once built; there is no reload
//! - Every field has a default so an empty file yields the well-known names
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{Environment, ProcessEnv};
pub use loader::{load_spec, ConfigError};
pub use schema::{PrecedenceSpec, SettingDefaults, Settings};
pub use validation::{validate_spec, ValidationError};
