//! Precedence spec loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::PrecedenceSpec;
use crate::config::validation::{validate_spec, ValidationError};

/// Error type for spec loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate a precedence spec from a TOML file.
pub fn load_spec(path: &Path) -> Result<PrecedenceSpec, ConfigError> {
    let content = fs::read_to_string(path)?;
    let spec: PrecedenceSpec = toml::from_str(&content)?;

    validate_spec(&spec).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Precedence spec loaded");
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_spec(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_full_spec() {
        let file = write_spec(
            r#"
            [environment]
            port = ["SERVICE_PORT"]
            address = ["SERVICE_HOST"]
            root = ["SERVICE_ROOT"]

            [command_line]
            port = ["listen-port"]
            address = ["bind"]
            root = ["prefix"]

            [defaults]
            port = 8080
            root = "/app"
            "#,
        );

        let spec = load_spec(file.path()).unwrap();
        assert_eq!(spec.environment.port, vec!["SERVICE_PORT"]);
        assert_eq!(spec.command_line.address, vec!["bind"]);
        assert_eq!(spec.defaults.port, Some(8080));
        assert_eq!(spec.defaults.root.as_deref(), Some("/app"));
        assert!(spec.defaults.address.is_empty());
    }

    #[test]
    fn empty_file_yields_default_spec() {
        let file = write_spec("");
        assert_eq!(load_spec(file.path()).unwrap(), PrecedenceSpec::default());
    }

    #[test]
    fn rejects_out_of_range_default_port() {
        let file = write_spec("[defaults]\nport = 70000\n");
        assert!(matches!(load_spec(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_invalid_spec() {
        let file = write_spec("[command_line]\nport = [\"listen\"]\nroot = [\"listen\"]\n");
        match load_spec(file.path()) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::DuplicateFlag("listen".into())]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_spec(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
