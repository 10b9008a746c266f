//! Precedence spec validation.
//!
//! # Responsibilities
//! - Reject empty names and names containing whitespace
//! - Reject flag names written with a leading dash
//! - Detect flag names registered for more than one setting
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PrecedenceSpec → Result<(), Vec<ValidationError>>
//! - Runs before any flag is registered with the argument parser

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{PrecedenceSpec, Settings};

/// A single problem found in a [`PrecedenceSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{source_name} {setting} name #{index} is empty")]
    EmptyName {
        source_name: &'static str,
        setting: &'static str,
        index: usize,
    },

    #[error("{source_name} {setting} name {name:?} contains whitespace")]
    Whitespace {
        source_name: &'static str,
        setting: &'static str,
        name: String,
    },

    #[error("command line name {0:?} must be given without leading dashes")]
    LeadingDash(String),

    #[error("command line name {0:?} is declared more than once")]
    DuplicateFlag(String),
}

/// Check a spec before resolution uses it.
pub fn validate_spec(spec: &PrecedenceSpec) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_names("environment", &spec.environment, &mut errors);
    check_names("command line", &spec.command_line, &mut errors);

    let mut seen = HashSet::new();
    for name in spec.command_line.names() {
        if name.starts_with('-') {
            errors.push(ValidationError::LeadingDash(name.to_string()));
        }
        if !name.is_empty() && !seen.insert(name) {
            errors.push(ValidationError::DuplicateFlag(name.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_names(source_name: &'static str, settings: &Settings, errors: &mut Vec<ValidationError>) {
    let lists = [
        ("port", &settings.port),
        ("address", &settings.address),
        ("root", &settings.root),
    ];

    for (setting, names) in lists {
        for (index, name) in names.iter().enumerate() {
            if name.is_empty() {
                errors.push(ValidationError::EmptyName {
                    source_name,
                    setting,
                    index,
                });
            } else if name.chars().any(char::is_whitespace) {
                errors.push(ValidationError::Whitespace {
                    source_name,
                    setting,
                    name: name.clone(),
                });
            }
        }
    }
}
