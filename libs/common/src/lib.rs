//! Shared tool infrastructure
//!
//! - `logging`: tracing subscriber setup with runtime level reload
//! - `config_loader`: layered figment configuration (defaults → file → env)

pub mod config_loader;
pub mod logging;

pub use config_loader::{load_config, ConfigError};
pub use logging::{LogFormat, LoggingConfig};
