//! Logging setup shared by the pqwire tools
//!
//! Console-only: events go to stderr so command output on stdout stays
//! machine readable. Level filtering honours `RUST_LOG` first, then the
//! configured level, and can be changed at runtime through [`set_log_level`].

use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Custom format for log level with brackets: `[INFO]`, `[WARN]`, etc.
fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

/// Custom event formatter that outputs: `timestamp [LEVEL] message`
///
/// Example output: `2025-12-02T00:50:44.809123Z [INFO] Decoded int4`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::TRACE => "\x1b[35m", // magenta
                Level::DEBUG => "\x1b[34m", // blue
                Level::INFO => "\x1b[32m",  // green
                Level::WARN => "\x1b[33m",  // yellow
                Level::ERROR => "\x1b[31m", // red
            };
            write!(writer, "{}{}\x1b[0m ", color, format_level(&level))?;
        } else {
            write!(writer, "{} ", format_level(&level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `timestamp [LEVEL] message`
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error, or a full `EnvFilter` spec)
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Colour the level tag (text format only)
    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            ansi: default_true(),
        }
    }
}

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("Logging already initialized")]
    AlreadyInitialized,

    #[error("Logging not initialized with reload support")]
    NotInitialized,

    #[error("Failed to reload log filter: {0}")]
    Reload(String),
}

// Dynamic log level reload support
type EnvFilterReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;
static LOG_FILTER_HANDLE: OnceLock<EnvFilterReloadHandle> = OnceLock::new();
static CURRENT_LOG_LEVEL: OnceLock<Mutex<String>> = OnceLock::new();

fn parse_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel {
        level: level.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber
///
/// # Errors
/// [`LoggingError::InvalidLevel`] for an unparsable filter,
/// [`LoggingError::AlreadyInitialized`] when a global subscriber exists.
pub fn init_with_config(config: &LoggingConfig) -> Result<(), LoggingError> {
    // RUST_LOG wins over the configured level
    let filter_str = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.level.clone());
    let env_filter = parse_filter(&filter_str)?;

    let (reload_filter, reload_handle) = reload::Layer::new(env_filter);

    let console_layer = match config.format {
        LogFormat::Text => fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .event_format(BracketedLevelFormat)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_level(true)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(reload_filter)
        .with(console_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    let _ = LOG_FILTER_HANDLE.set(reload_handle);
    let current = CURRENT_LOG_LEVEL.get_or_init(|| Mutex::new(String::new()));
    if let Ok(mut guard) = current.lock() {
        *guard = filter_str.clone();
    }

    tracing::debug!("Logging initialized: {}", filter_str);
    Ok(())
}

/// Dynamically set log filter level at runtime
///
/// # Arguments
/// * `level` - Log level string (e.g., "debug", "info") or full filter spec
///   (e.g., "info,pq_errors=trace")
pub fn set_log_level(level: &str) -> Result<(), LoggingError> {
    let handle = LOG_FILTER_HANDLE
        .get()
        .ok_or(LoggingError::NotInitialized)?;

    let new_filter = parse_filter(level)?;

    handle
        .reload(new_filter)
        .map_err(|e| LoggingError::Reload(e.to_string()))?;

    if let Some(current) = CURRENT_LOG_LEVEL.get() {
        if let Ok(mut guard) = current.lock() {
            *guard = level.to_string();
        }
    }

    tracing::debug!("Log level changed to: {}", level);
    Ok(())
}

/// Get current log filter level
pub fn get_log_level() -> String {
    CURRENT_LOG_LEVEL
        .get()
        .and_then(|m| m.lock().ok())
        .map(|guard| guard.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(&Level::INFO), "[INFO]");
        assert_eq!(format_level(&Level::ERROR), "[ERROR]");
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Text);
        assert!(config.ansi);
    }

    #[test]
    fn test_config_deserialize_lowercase_format() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"level":"debug","format":"json"}"#).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.ansi);
    }

    #[test]
    fn test_invalid_filter_rejected() {
        assert!(matches!(
            parse_filter("pq_bytes=notalevel"),
            Err(LoggingError::InvalidLevel { .. })
        ));
    }

    // Only test in this binary that touches the global subscriber
    #[test]
    fn test_init_reload_and_double_init() {
        let config = LoggingConfig {
            ansi: false,
            ..Default::default()
        };
        init_with_config(&config).unwrap();
        assert!(matches!(
            init_with_config(&config),
            Err(LoggingError::AlreadyInitialized)
        ));

        set_log_level("debug").unwrap();
        assert_eq!(get_log_level(), "debug");
        assert!(set_log_level("pq_bytes=bogus").is_err());
        assert_eq!(get_log_level(), "debug");
    }
}
