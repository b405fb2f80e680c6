//! Production configuration system
//!
//! Provides centralized configuration management with:
//! - Environment variable support
//! - Config file loading (optional)
//! - Runtime defaults
//! - Validation and type safety

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Admin API configuration
    pub api: ApiConfig,

    /// Refresh behavior
    pub refresh: RefreshConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Config-file fallback for the admin key; keychain and environment
    /// take precedence (see `credentials`).
    pub admin_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub interval_minutes: u64,
    pub default_timeframe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            api: ApiConfig {
                base_url: "https://api.anthropic.com/v1".to_string(),
                timeout_secs: 30,
                admin_api_key: None,
            },
            refresh: RefreshConfig {
                interval_minutes: 5,
                default_timeframe: "today".to_string(),
            },
            paths: PathsConfig {
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // Try to load from config file if it exists
        let config_paths = [
            PathBuf::from("claude-usage-tracker.toml"),
            PathBuf::from(".claude-usage-tracker.toml"),
            dirs::config_dir()
                .map(|d| d.join("claude-usage-tracker").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        // Override with environment variables
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // Logging overrides
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        // API overrides
        if let Ok(val) = env::var("ANTHROPIC_BASE_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = env::var("CLAUDE_TRACKER_TIMEOUT_SECS") {
            self.api.timeout_secs = val.parse().context("Invalid CLAUDE_TRACKER_TIMEOUT_SECS")?;
        }

        // Refresh overrides
        if let Ok(val) = env::var("CLAUDE_TRACKER_REFRESH_MINUTES") {
            self.refresh.interval_minutes = val
                .parse()
                .context("Invalid CLAUDE_TRACKER_REFRESH_MINUTES")?;
        }
        if let Ok(val) = env::var("CLAUDE_TRACKER_TIMEFRAME") {
            self.refresh.default_timeframe = val;
        }

        // Path overrides
        if let Ok(val) = env::var("CLAUDE_TRACKER_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(anyhow::anyhow!("API base URL cannot be empty"));
        }

        if self.api.timeout_secs == 0 {
            return Err(anyhow::anyhow!("API timeout must be greater than 0"));
        }

        if self.refresh.interval_minutes == 0 {
            return Err(anyhow::anyhow!("Refresh interval must be greater than 0"));
        }

        // File logging needs its directory (create if needed)
        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }

    /// Save current configuration to file
    #[allow(dead_code)]
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!(path = %path.display(), "Configuration saved to file");

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().expect("Failed to load configuration"))
}
