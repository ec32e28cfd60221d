//! Configuration management for the fatwa browser

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_LIST_LIMIT;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fatwa API server URL
    pub server_url: String,

    /// UI configuration
    pub ui: UiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of rows requested per list query
    pub list_limit: u32,

    /// Lines scrolled per keypress in the detail view
    pub detail_scroll_step: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_LIST_LIMIT,
            detail_scroll_step: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply command
    /// line overrides.
    pub fn load(
        config_path: Option<&String>,
        server_url: &str,
        log_level: &str,
    ) -> Result<Self> {
        let mut config = if let Some(path) = config_path {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        config.server_url = server_url.to_string();
        config.logging.level = log_level.to_string();

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.server_url)
            .with_context(|| format!("Invalid server URL: {}", self.server_url))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => anyhow::bail!("Unsupported server URL scheme: {}", scheme),
        }

        // The server clamps limit to 1..=200; reject out-of-range values here
        // instead of silently requesting something else.
        if self.ui.list_limit == 0 || self.ui.list_limit > 200 {
            anyhow::bail!("list_limit must be between 1 and 200");
        }

        if self.ui.detail_scroll_step == 0 {
            anyhow::bail!("detail_scroll_step must be greater than 0");
        }

        Ok(())
    }
}
