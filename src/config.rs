//! Configuration module for loading and parsing TOML configuration files.

use market_data_client::{ClientConfig, HistoryPeriod};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Market data provider configuration.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Dashboard behaviour.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Market data provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the quote API.
    pub base_url: String,
    /// Page that hands out the session cookie.
    pub cookie_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent to the provider.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: client.base_url,
            cookie_url: client.cookie_url,
            timeout_secs: client.timeout.as_secs(),
            user_agent: client.user_agent,
        }
    }
}

impl ProviderConfig {
    /// Builds the HTTP client configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            cookie_url: self.cookie_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Dashboard behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Symbol shown when the page is opened without one.
    pub default_symbol: String,
    /// History window used for the last-close price fallback.
    pub history_period: HistoryPeriod,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbol: "AAPL".to_string(),
            history_period: HistoryPeriod::OneDay,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `HOST` and `PORT` environment overrides.
    ///
    /// # Errors
    /// Returns error if `PORT` is not a valid port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(std::env::var("HOST").ok(), std::env::var("PORT").ok())
    }

    fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT must be a valid number: {}", port)))?;
        }
        Ok(())
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("provider.base_url", &self.provider.base_url),
            ("provider.cookie_url", &self.provider.cookie_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ConfigError::InvalidValue(format!("{} is not a valid URL: {}", name, e)))?;
        }

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "provider.timeout_secs must be positive".to_string(),
            ));
        }

        if self.dashboard.default_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "dashboard.default_symbol cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
