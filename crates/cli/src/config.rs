//! `recnorm.toml`: logging level and named destination profiles.
//!
//! # Example
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [destinations.warehouse]
//! policy = "drop-time-offset"
//!
//! [destinations.s3-jsonl]
//! policy = "stringify-temporal"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use recnorm_mapper::PolicyKind;
use serde::Deserialize;

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "recnorm.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Destination profiles, keyed by name.
    #[serde(default)]
    pub destinations: BTreeMap<String, DestinationConfig>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A `tracing` filter directive such as `"debug"` or
    /// `"recnorm_mapper=trace"`.
    pub level: Option<String>,
}

/// `[destinations.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    pub policy: PolicyKind,
}

impl Config {
    /// Policy configured for destination `name`.
    pub fn policy_for(&self, name: &str) -> Result<PolicyKind, String> {
        match self.destinations.get(name) {
            Some(destination) => Ok(destination.policy),
            None if self.destinations.is_empty() => Err(format!(
                "unknown destination '{}': no destinations are configured",
                name
            )),
            None => Err(format!(
                "unknown destination '{}' (configured: {})",
                name,
                self.destinations
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Load the explicit config if one was given, else `recnorm.toml` from the
/// working directory if it exists, else the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(Config::default());
            }
            fallback
        }
    };
    read_config(&path)
}
