//! pqwire configuration
//!
//! Loaded from defaults, then an optional file (`--config` / `PQWIRE_CONFIG`),
//! then `PQWIRE_*` environment variables.

use std::path::Path;

use anyhow::{Context, Result};
use pq_common::{load_config, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Environment prefix for overrides, e.g. `PQWIRE_OUTPUT__JSON=true`
pub const ENV_PREFIX: &str = "PQWIRE_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Output rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON instead of coloured text
    #[serde(default)]
    pub json: bool,

    /// Upper-case hex digits
    #[serde(default = "default_true")]
    pub uppercase_hex: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            uppercase_hex: default_true(),
        }
    }
}

impl ToolConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        load_config(path, ENV_PREFIX).context("Failed to load pqwire configuration")
    }
}
