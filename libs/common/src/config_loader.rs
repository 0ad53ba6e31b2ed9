//! Configuration loading helper functions
//!
//! Layers, lowest priority first:
//! 1. `T::default()`
//! 2. an optional TOML / YAML / JSON file (format chosen by extension)
//! 3. environment variables with the given prefix, `__` separating nested keys
//!    (e.g. `PQWIRE_LOGGING__LEVEL=debug`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse config: {0}")]
    Extract(String),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Build the layered figment without extracting it
pub fn build_figment<T>(path: Option<&Path>, env_prefix: &str) -> Result<Figment>
where
    T: Serialize + Default,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        figment = match extension {
            "json" => figment.merge(Json::file(path)),
            "toml" => figment.merge(Toml::file(path)),
            "yaml" | "yml" => figment.merge(Yaml::file(path)),
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        info!("Using configuration file {}", path.display());
    } else {
        debug!("No configuration file given, using defaults");
    }

    Ok(figment.merge(Env::prefixed(env_prefix).split("__")))
}

/// Load `T` from defaults, an optional file and the environment
///
/// # Errors
/// [`ConfigError::FileNotFound`] / [`ConfigError::UnsupportedFormat`] for a bad
/// file argument, [`ConfigError::Extract`] when the merged values do not fit `T`.
pub fn load_config<T>(path: Option<&Path>, env_prefix: &str) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    build_figment::<T>(path, env_prefix)?
        .extract()
        .map_err(|e| ConfigError::Extract(e.to_string()))
}
