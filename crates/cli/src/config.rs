//! CLI configuration module

use serde::{Deserialize, Serialize};
use solrnav_core::{Result, SolrConfig, SolrError};
use std::path::{Path, PathBuf};

/// CLI-specific configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default output format
    pub default_output_format: OutputFormat,
    /// Default log level
    pub default_log_level: LogLevel,
    /// Whether to use colors in output
    pub use_colors: bool,
    /// Solr configuration file used when `--config` is not given
    pub default_config_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_output_format: OutputFormat::Pretty,
            default_log_level: LogLevel::Warn,
            use_colors: true,
            default_config_path: None,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Pretty,
    Compact,
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = SolrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "table" => Ok(Self::Table),
            _ => Err(SolrError::validation(format!(
                "Invalid output format: {}",
                s
            ))),
        }
    }
}

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = SolrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(SolrError::validation(format!("Invalid log level: {}", s))),
        }
    }
}

/// CLI configuration manager
pub struct ConfigManager {
    cli_config: CliConfig,
    solr_config: Option<SolrConfig>,
    solr_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            cli_config: CliConfig::default(),
            solr_config: None,
            solr_config_path: None,
        }
    }

    /// Load CLI configuration from file
    pub fn load_cli_config<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        self.cli_config = match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(_) => serde_json::from_str(&content)?,
        };

        Ok(())
    }

    /// Save CLI configuration to file
    pub fn save_cli_config<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(&self.cli_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load Solr configuration from a file, with `SOLRNAV_*` overrides applied
    pub fn load_solr_config<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.solr_config = Some(SolrConfig::load(Some(path.as_ref()))?);
        self.solr_config_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// The Solr configuration file in effect: the one loaded explicitly,
    /// otherwise the CLI config's default path when that file exists
    pub fn solr_config_source(&self) -> Option<&Path> {
        self.solr_config_path.as_deref().or_else(|| {
            self.cli_config
                .default_config_path
                .as_deref()
                .filter(|path| path.is_file())
        })
    }

    /// Get CLI configuration
    pub fn cli_config(&self) -> &CliConfig {
        &self.cli_config
    }

    /// Get Solr configuration
    pub fn solr_config(&self) -> Option<&SolrConfig> {
        self.solr_config.as_ref()
    }

    /// The loaded Solr configuration, or one built from the default
    /// config path and the environment
    pub fn solr_config_or_default(&self) -> Result<SolrConfig> {
        if let Some(config) = &self.solr_config {
            return Ok(config.clone());
        }
        SolrConfig::load(self.cli_config.default_config_path.as_deref())
    }

    /// Set CLI configuration
    pub fn set_cli_config(&mut self, config: CliConfig) {
        self.cli_config = config;
    }

    /// Set Solr configuration
    pub fn set_solr_config(&mut self, config: SolrConfig) {
        self.solr_config = Some(config);
    }

    /// Get the default CLI config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = if let Some(dir) = dirs::config_dir() {
            dir.join("solrnav")
        } else {
            std::env::current_dir()?.join(".solrnav")
        };

        Ok(config_dir)
    }

    /// Get the default CLI config file path
    pub fn default_cli_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("cli-config.yaml"))
    }

    /// Load the CLI configuration from the default path when it exists
    pub fn load_default_cli_config(&mut self) -> Result<()> {
        let path = Self::default_cli_config_path()?;
        if path.exists() {
            tracing::debug!("Loading CLI configuration from {:?}", path);
            self.load_cli_config(&path)?;
        }
        Ok(())
    }

    /// Merge CLI arguments with configuration
    pub fn merge_with_args(&mut self, args: &CliArgs) -> Result<()> {
        if let Some(output_format) = &args.output_format {
            self.cli_config.default_output_format = output_format.parse()?;
        }

        if let Some(log_level) = &args.log_level {
            self.cli_config.default_log_level = log_level.parse()?;
        }

        if let Some(use_colors) = args.use_colors {
            self.cli_config.use_colors = use_colors;
        }

        if let Some(config_file) = &args.config_file {
            self.load_solr_config(config_file)?;
        }

        if args.core_url.is_some() || args.verbose {
            let mut solr_config = self.solr_config_or_default()?;
            if let Some(core_url) = &args.core_url {
                solr_config.core_url = core_url.clone();
            }
            solr_config.verbose |= args.verbose;
            solr_config.validate()?;
            self.solr_config = Some(solr_config);
        }

        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI arguments that can override configuration
#[derive(Debug, Default)]
pub struct CliArgs {
    pub output_format: Option<String>,
    pub log_level: Option<String>,
    pub use_colors: Option<bool>,
    pub config_file: Option<PathBuf>,
    pub core_url: Option<String>,
    pub verbose: bool,
}

/// Check if output supports colors
pub fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Check if we're connected to a terminal
    atty::is(atty::Stream::Stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }

    #[test]
    fn test_partial_cli_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cli-config.yaml");
        std::fs::write(&path, "default_output_format: json\n").unwrap();

        let mut manager = ConfigManager::new();
        manager.load_cli_config(&path).unwrap();
        assert_eq!(manager.cli_config().default_output_format, OutputFormat::Json);
        assert_eq!(manager.cli_config().default_log_level, LogLevel::Warn);
        assert!(manager.cli_config().use_colors);
    }

    #[test]
    fn test_cli_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cli-config.yaml");

        let mut manager = ConfigManager::new();
        manager.set_cli_config(CliConfig {
            default_output_format: OutputFormat::Table,
            use_colors: false,
            ..Default::default()
        });
        manager.save_cli_config(&path).unwrap();

        let mut loaded = ConfigManager::new();
        loaded.load_cli_config(&path).unwrap();
        assert_eq!(loaded.cli_config().default_output_format, OutputFormat::Table);
        assert!(!loaded.cli_config().use_colors);
    }

    #[test]
    fn test_merge_with_args() {
        let mut manager = ConfigManager::new();
        let args = CliArgs {
            output_format: Some("json".to_string()),
            log_level: Some("debug".to_string()),
            use_colors: Some(false),
            core_url: Some("http://solr.example.com:8983/solr/books".to_string()),
            verbose: true,
            ..Default::default()
        };

        manager.merge_with_args(&args).unwrap();

        assert_eq!(manager.cli_config().default_output_format, OutputFormat::Json);
        assert_eq!(manager.cli_config().default_log_level, LogLevel::Debug);
        assert!(!manager.cli_config().use_colors);

        let solr = manager.solr_config().unwrap();
        assert_eq!(solr.core_url, "http://solr.example.com:8983/solr/books");
        assert!(solr.verbose);
    }

    #[test]
    fn test_merge_rejects_bad_core_url() {
        let mut manager = ConfigManager::new();
        let args = CliArgs {
            core_url: Some("ftp://example.com/solr".to_string()),
            ..Default::default()
        };
        assert!(manager.merge_with_args(&args).is_err());
    }

    #[test]
    fn test_solr_config_source() {
        let temp_dir = TempDir::new().unwrap();
        let default_path = temp_dir.path().join("default.yaml");
        let explicit_path = temp_dir.path().join("explicit.yaml");
        let yaml = "core_url: http://localhost:8983/solr/bibdata\nlogging:\n  level: debug\n";
        std::fs::write(&default_path, yaml).unwrap();
        std::fs::write(&explicit_path, yaml).unwrap();

        let mut manager = ConfigManager::new();
        assert!(manager.solr_config_source().is_none());

        manager.set_cli_config(CliConfig {
            default_config_path: Some(temp_dir.path().join("missing.yaml")),
            ..Default::default()
        });
        assert!(manager.solr_config_source().is_none());

        manager.set_cli_config(CliConfig {
            default_config_path: Some(default_path.clone()),
            ..Default::default()
        });
        assert_eq!(manager.solr_config_source(), Some(default_path.as_path()));
        assert_eq!(manager.solr_config_or_default().unwrap().logging.level, "debug");

        let args = CliArgs {
            config_file: Some(explicit_path.clone()),
            ..Default::default()
        };
        manager.merge_with_args(&args).unwrap();
        assert_eq!(manager.solr_config_source(), Some(explicit_path.as_path()));
    }

    #[test]
    fn test_merge_loads_solr_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("solrnav.yaml");
        std::fs::write(
            &path,
            "core_url: http://localhost:8983/solr/bibdata\ndefaults:\n  rows: 20\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new();
        let args = CliArgs {
            config_file: Some(path),
            ..Default::default()
        };
        manager.merge_with_args(&args).unwrap();

        let solr = manager.solr_config().unwrap();
        assert_eq!(solr.core_url, "http://localhost:8983/solr/bibdata");
        assert_eq!(solr.defaults.rows, 20);
    }
}
