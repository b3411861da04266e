//! Application configuration management
//!
//! This module handles loading and validating configuration from TOML files.
//! All configuration is validated at startup.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default server port
const DEFAULT_PORT: u16 = 8082;

/// Default seed file location
const DEFAULT_SEED_PATH: &str = "data/quotations.json";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

/// Where quotation rows are served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Seed file, re-readable through the reload endpoint
    #[default]
    JsonFile,
    /// Snapshot of the seed file taken at startup
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub source: DataSource,
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            seed_path: default_seed_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_seed_path() -> PathBuf {
    PathBuf::from(DEFAULT_SEED_PATH)
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Application configuration loaded from TOML files
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Repository backing the listing
    pub data_source: DataSource,

    /// JSON seed file holding quotation rows
    pub seed_path: PathBuf,

    /// Expected client API key; validation is off when unset
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The TOML file cannot be read or parsed
    /// - Configuration values are invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).context("Failed to parse TOML configuration")?;
        let config = Self::from_toml(config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment and config file
    ///
    /// Looks for config.toml in current directory by default
    pub fn from_env() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::from_file(config_path)
    }

    fn from_toml(config: TomlConfig) -> Self {
        Config {
            host: config.server.host,
            port: config.server.port,
            log_level: config.server.log_level,
            data_source: config.data.source,
            seed_path: config.data.seed_path,
            // An empty key in the file means no key
            api_key: config.auth.api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.port == 0 {
            bail!("server.port must be greater than 0");
        }
        if self.seed_path.as_os_str().is_empty() {
            bail!("data.seed_path must not be empty");
        }
        Ok(())
    }

    /// Validate client's API key
    ///
    /// If api_key is set, validates that client_api_key matches.
    /// If not set, validation is skipped and returns true.
    pub fn validate_client_api_key(&self, client_api_key: &str) -> bool {
        match &self.api_key {
            Some(expected_key) => client_api_key == expected_key,
            None => true,
        }
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
