//! Precedence spec definitions.
//!
//! A [`PrecedenceSpec`] names, per setting and per source, the ordered list of
//! candidates the resolver consults. All types derive Serde traits so a spec can be
//! deserialized from a TOML file.

use serde::{Deserialize, Serialize};

/// Candidate names for the three listen settings within a single source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Names that may carry a listen address (host, host:port or :port).
    pub address: Vec<String>,

    /// Names that may carry the listen port.
    pub port: Vec<String>,

    /// Names that may carry the URL path prefix.
    pub root: Vec<String>,
}

impl Settings {
    /// Every name in the order port, address, root.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.port
            .iter()
            .chain(&self.address)
            .chain(&self.root)
            .map(String::as_str)
    }
}

/// Lowest-priority values used when neither source yields a setting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SettingDefaults {
    /// Port used when no source resolves one.
    pub port: Option<u16>,

    /// Addresses used when no source yields any.
    pub address: Vec<String>,

    /// Root used when no source yields a non-empty one.
    pub root: Option<String>,
}

/// Ordered candidate names per setting for the environment and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrecedenceSpec {
    /// Environment variable names, checked first-to-last.
    pub environment: Settings,

    /// Long flag names (without the leading `--`), checked first-to-last.
    pub command_line: Settings,

    /// Fallback values.
    pub defaults: SettingDefaults,
}

impl Default for PrecedenceSpec {
    fn default() -> Self {
        Self {
            environment: Settings {
                address: names(&["ADDRESS", "APP_ADDRESS"]),
                port: names(&["PORT", "APP_PORT", "HTTP_PLATFORM_PORT", "ASPNETCORE_PORT"]),
                root: names(&["APP_ROOT"]),
            },
            command_line: Settings {
                address: names(&["addr", "address"]),
                port: names(&["port"]),
                root: names(&["root"]),
            },
            defaults: SettingDefaults::default(),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
