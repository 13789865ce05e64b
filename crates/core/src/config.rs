//! Configuration types for the solrnav core library

use crate::{Result, SolrError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Rows requested when the caller does not say otherwise
pub const DEFAULT_ROWS: usize = 10;

/// Query sent when the caller's query text is empty
pub const DEFAULT_QUERY: &str = "*";

/// Prefix for environment overrides, e.g. `SOLRNAV_CORE_URL`
pub const ENV_PREFIX: &str = "SOLRNAV";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolrConfig {
    /// Base URL of the Solr core, e.g. `http://localhost:8983/solr/bibdata`
    pub core_url: String,
    /// Log every request URL at info level
    #[serde(default)]
    pub verbose: bool,
    /// Request timeout applied by the transport (none when absent)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    /// Send searches to the `/bjqfacet` handler instead of `/select`
    #[serde(default)]
    pub block_join_faceting: bool,
    /// Defaults used when building and serializing search parameters
    #[serde(default)]
    pub defaults: QueryDefaults,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            core_url: "http://localhost:8983/solr/collection1".to_string(),
            verbose: false,
            timeout_seconds: None,
            block_join_faceting: false,
            defaults: QueryDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Defaults for search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefaults {
    /// Row count that is left off the query string
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Query used when the query text is empty
    #[serde(default = "default_query")]
    pub query: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            query: default_query(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format (json, text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SolrConfig {
    /// Configuration for a core URL with everything else defaulted
    pub fn new<S: Into<String>>(core_url: S) -> Self {
        Self {
            core_url: core_url.into(),
            ..Default::default()
        }
    }

    /// Builder-style verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        match serde_yaml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(_) => {
                let config = serde_json::from_str(&content)?;
                Ok(config)
            }
        }
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Layer an optional configuration file and `SOLRNAV_*` environment
    /// variables over the defaults. Nested keys use a double underscore,
    /// e.g. `SOLRNAV_DEFAULTS__ROWS=20`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&SolrConfig::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: SolrConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// The core URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.core_url.trim_end_matches('/')
    }

    /// The Solr root the core lives under, e.g. `http://localhost:8983/solr`
    /// for `http://localhost:8983/solr/bibdata`. Admin requests go here.
    pub fn solr_url(&self) -> &str {
        let base = self.base_url();
        match base.rsplit_once('/') {
            Some((root, core)) if !core.is_empty() && !root.ends_with('/') => root,
            _ => base,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.core_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SolrError::validation(
                "Solr core URL must use http or https scheme",
            ));
        }

        if self.defaults.query.is_empty() {
            return Err(SolrError::validation("Default query cannot be empty"));
        }

        if self.timeout_seconds == Some(0) {
            return Err(SolrError::validation(
                "timeout_seconds must be greater than 0",
            ));
        }

        Ok(())
    }
}

// Default value functions
fn default_rows() -> usize {
    DEFAULT_ROWS
}
fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SolrConfig::default();
        assert_eq!(config.defaults.rows, 10);
        assert_eq!(config.defaults.query, "*");
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = SolrConfig::new("http://localhost:8983/solr/bibdata/");
        assert_eq!(config.base_url(), "http://localhost:8983/solr/bibdata");
    }

    #[test]
    fn test_solr_url_drops_core_name() {
        let config = SolrConfig::new("http://localhost:8983/solr/bibdata/");
        assert_eq!(config.solr_url(), "http://localhost:8983/solr");

        let config = SolrConfig::new("http://localhost:8983");
        assert_eq!(config.solr_url(), "http://localhost:8983");
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(SolrConfig::new("not a url").validate().is_err());
        assert!(SolrConfig::new("ftp://example.com/solr").validate().is_err());

        let mut config = SolrConfig::new("https://search.example.com/solr/core");
        assert!(config.validate().is_ok());

        config.defaults.query = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_with_partial_fields() {
        let yaml = r#"
core_url: http://localhost:8983/solr/bibdata
verbose: true
defaults:
  rows: 25
"#;
        let config: SolrConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.verbose);
        assert!(!config.block_join_faceting);
        assert_eq!(config.defaults.rows, 25);
        assert_eq!(config.defaults.query, "*");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("solrnav.yaml");

        let config = SolrConfig::new("http://localhost:8983/solr/bibdata").with_verbose(true);
        config.to_file(&path).unwrap();

        let loaded = SolrConfig::from_file(&path).unwrap();
        assert_eq!(loaded.core_url, config.core_url);
        assert!(loaded.verbose);
        assert_eq!(loaded.defaults, QueryDefaults::default());
    }

    #[test]
    fn test_from_file_accepts_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("solrnav.json");
        std::fs::write(
            &path,
            r#"{"core_url": "http://solr:8983/solr/books", "timeout_seconds": 5}"#,
        )
        .unwrap();

        let config = SolrConfig::from_file(&path).unwrap();
        assert_eq!(config.core_url, "http://solr:8983/solr/books");
        assert_eq!(config.timeout_seconds, Some(5));
    }

    #[test]
    fn test_load_layers_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("solrnav.yaml");
        std::fs::write(
            &path,
            "core_url: http://solr:8983/solr/books\ndefaults:\n  rows: 50\n",
        )
        .unwrap();

        let config = SolrConfig::load(Some(&path)).unwrap();
        assert_eq!(config.core_url, "http://solr:8983/solr/books");
        assert_eq!(config.defaults.rows, 50);
        assert_eq!(config.defaults.query, "*");
    }
}
