//! Logging infrastructure for solrnav
//!
//! Installs a tracing subscriber with an env filter and a text or JSON
//! formatting layer.

use solrnav_core::{LoggingConfig, Result, SolrError};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Crates whose chatter is capped at `warn`
const QUIET_TARGETS: &[&str] = &["hyper=warn", "reqwest=warn", "h2=warn"];

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to use JSON format
    pub json_format: bool,
    /// Whether to include timestamps
    pub with_timestamps: bool,
    /// Whether to include file/line information
    pub with_file_info: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamps: true,
            with_file_info: false,
        }
    }
}

impl From<&LoggingConfig> for LoggerConfig {
    fn from(logging: &LoggingConfig) -> Self {
        Self {
            level: logging.level.clone(),
            json_format: logging.format.eq_ignore_ascii_case("json"),
            ..Default::default()
        }
    }
}

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let level = Level::from_str(&config.level).map_err(|e| {
        SolrError::validation(format!("Invalid log level '{}': {}", config.level, e))
    })?;

    let mut env_filter = EnvFilter::from_default_env().add_directive(level.into());
    for target in QUIET_TARGETS {
        let directive = target.parse().map_err(|e| {
            SolrError::validation(format!("Invalid log directive '{}': {}", target, e))
        })?;
        env_filter = env_filter.add_directive(directive);
    }

    let fmt_layer = if config.json_format {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed()
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info);

        if config.with_timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| SolrError::validation(format!("Failed to initialize logger: {}", e)))?;

    tracing::debug!("Logger initialized with level: {}", config.level);
    Ok(())
}

/// Create a logger configuration from `SOLRNAV_LOG_*` environment variables
pub fn logger_config_from_env() -> LoggerConfig {
    LoggerConfig {
        level: std::env::var("SOLRNAV_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        json_format: std::env::var("SOLRNAV_LOG_JSON")
            .map(|v| v.parse().unwrap_or(false))
            .unwrap_or(false),
        with_timestamps: std::env::var("SOLRNAV_LOG_TIMESTAMPS")
            .map(|v| v.parse().unwrap_or(true))
            .unwrap_or(true),
        with_file_info: std::env::var("SOLRNAV_LOG_FILE_INFO")
            .map(|v| v.parse().unwrap_or(false))
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_config_default() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.with_timestamps);
        assert!(!config.with_file_info);
    }

    #[test]
    fn test_logger_config_from_logging_config() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "JSON".to_string(),
        };
        let config = LoggerConfig::from(&logging);
        assert_eq!(config.level, "debug");
        assert!(config.json_format);

        let config = LoggerConfig::from(&LoggingConfig::default());
        assert!(!config.json_format);
    }

    #[test]
    fn test_init_logger_rejects_unknown_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        let err = init_logger(config).unwrap_err();
        assert!(err.to_string().contains("Invalid log level 'loud'"));
    }

    #[test]
    fn test_logger_config_from_env() {
        std::env::set_var("SOLRNAV_LOG_LEVEL", "debug");
        std::env::set_var("SOLRNAV_LOG_JSON", "true");

        let config = logger_config_from_env();
        assert_eq!(config.level, "debug");
        assert!(config.json_format);

        std::env::remove_var("SOLRNAV_LOG_LEVEL");
        std::env::remove_var("SOLRNAV_LOG_JSON");

        let config = logger_config_from_env();
        assert_eq!(config.level, "info");
    }
}
