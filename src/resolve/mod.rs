//! Listen configuration resolution.
//!
//! # Data Flow
//! ```text
//! PrecedenceSpec (or the default spec)
//!     → validation (names usable as env vars / long flags)
//!     → flags.rs (register one flag per command-line name, parse argv)
//!     → setting.rs (port, root: command line over environment over defaults)
//!     → addresses: first environment address, then every command-line address
//!     → http::prefix (normalize root, wrap router)
//!     → address.rs (append the port where an address lacks one)
//!     → Resolved { addresses, handler, port, root }
//! ```
//!
//! # Design Decisions
//! - Resolution is synchronous and reads the environment through [`Environment`]
//! - A malformed environment port is skipped; a malformed argument aborts
//! - Addresses accumulate in order and are never de-duplicated
//! - An address carrying its own port is never rewritten

pub mod address;
pub(crate) mod flags;
pub mod setting;

use std::ffi::OsString;
use std::fmt;

use axum::Router;
use thiserror::Error;

use crate::config::loader::join_errors;
use crate::config::{validate_spec, Environment, PrecedenceSpec, ProcessEnv, ValidationError};
use crate::http::prefix::{mount, normalize_root};
use setting::{first_match, resolve_setting, Source};

/// Error type for resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no handler specified")]
    NoHandler,

    #[error("invalid precedence spec: {}", join_errors(.0))]
    InvalidSpec(Vec<ValidationError>),

    #[error(transparent)]
    Arguments(#[from] clap::Error),

    #[error(
        "unable to find port, make sure to use one of the command line switches ({switches}) \
         or one of the environment variables ({variables})"
    )]
    PortNotFound { switches: String, variables: String },
}

/// Outcome of a resolution call.
#[derive(Clone)]
pub struct Resolved {
    /// Listen addresses in resolution order, each `host:port`.
    pub addresses: Vec<String>,

    /// The caller's router, wrapped when `root` is not `/`.
    pub handler: Router,

    /// Port appended to addresses that lacked one.
    pub port: Option<u16>,

    /// Canonical root path.
    pub root: String,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("addresses", &self.addresses)
            .field("port", &self.port)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Resolves listen settings from argv and an environment.
#[derive(Debug, Clone)]
pub struct Resolver<E = ProcessEnv> {
    spec: PrecedenceSpec,
    env: E,
}

impl Resolver<ProcessEnv> {
    /// Resolver reading the process environment.
    pub fn new(spec: PrecedenceSpec) -> Self {
        Self {
            spec,
            env: ProcessEnv,
        }
    }
}

impl Default for Resolver<ProcessEnv> {
    fn default() -> Self {
        Self::new(PrecedenceSpec::default())
    }
}

impl<E: Environment> Resolver<E> {
    /// Replace the environment the resolver reads.
    pub fn with_env<F: Environment>(self, env: F) -> Resolver<F> {
        Resolver {
            spec: self.spec,
            env,
        }
    }

    pub fn spec(&self) -> &PrecedenceSpec {
        &self.spec
    }

    /// Resolve `args` (program name excluded) and wrap `handler` for the root.
    pub fn resolve<I, T>(&self, args: I, handler: Option<Router>) -> Result<Resolved, ResolveError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let handler = handler.ok_or(ResolveError::NoHandler)?;
        validate_spec(&self.spec).map_err(ResolveError::InvalidSpec)?;

        let spec = &self.spec;
        let matches = flags::parse(&spec.command_line, args)?;

        let port = resolve_setting(
            &[
                (Source::CommandLine, spec.command_line.port.as_slice()),
                (Source::Environment, spec.environment.port.as_slice()),
            ],
            |source, name| match source {
                Source::CommandLine => flags::port(&matches, name),
                Source::Environment => self.env.non_empty(name).and_then(|value| parse_port(&value)),
            },
        );
        // A zero environment port ends the scan but still counts as unset.
        let port = match port {
            Some((source, port)) if port != 0 => {
                tracing::debug!(?source, port, "Port resolved");
                Some(port)
            }
            _ => spec.defaults.port.filter(|&port| port != 0),
        };

        let mut addresses: Vec<String> = first_match(&spec.environment.address, |name| {
            self.env.non_empty(name)
        })
        .into_iter()
        .collect();
        for name in &spec.command_line.address {
            addresses.extend(flags::addresses(&matches, name));
        }
        if addresses.is_empty() {
            addresses.clone_from(&spec.defaults.address);
        }
        if addresses.is_empty() {
            addresses.push(String::new());
        }

        let root = resolve_setting(
            &[
                (Source::CommandLine, spec.command_line.root.as_slice()),
                (Source::Environment, spec.environment.root.as_slice()),
            ],
            |source, name| match source {
                Source::CommandLine => flags::root(&matches, name),
                Source::Environment => self.env.non_empty(name),
            },
        );
        let root = match root {
            Some((source, root)) => {
                tracing::debug!(?source, root = %root, "Root resolved");
                root
            }
            None => spec.defaults.root.clone().unwrap_or_default(),
        };
        let root = normalize_root(&root);
        let handler = mount(&root, handler);

        let addresses = addresses
            .into_iter()
            .map(|address| address::finalize(address, port))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| self.port_not_found())?;

        tracing::info!(?addresses, ?port, root = %root, "Listen configuration resolved");

        Ok(Resolved {
            addresses,
            handler,
            port,
            root,
        })
    }

    fn port_not_found(&self) -> ResolveError {
        let switches = self
            .spec
            .command_line
            .port
            .iter()
            .map(|name| format!("--{name}"))
            .collect::<Vec<_>>()
            .join(", ");
        ResolveError::PortNotFound {
            switches,
            variables: self.spec.environment.port.join(", "),
        }
    }
}

/// Resolve with the process environment; `None` selects the default spec.
pub fn resolve<I, T>(
    args: I,
    handler: Option<Router>,
    spec: Option<&PrecedenceSpec>,
) -> Result<Resolved, ResolveError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Resolver::new(spec.cloned().unwrap_or_default()).resolve(args, handler)
}

/// Decimal digits only, fitting in 16 bits.
fn parse_port(value: &str) -> Option<u16> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
