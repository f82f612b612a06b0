//! Configuration module for the shoe catalog client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::Path;
use std::str::FromStr;

use reqwest::Url;

use crate::errors::ConfigError;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base location of the remote `/shoes` resource
    pub base_url: Url,
    /// Pre-shared key sent as `x-api-key`, if the backend requires one
    pub api_key: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars()
    }

    /// Load an explicit env file, then read the environment. Variables already set win.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::from_path(path)?;
        Self::from_vars()
    }

    fn from_vars() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            &env::var("SHOE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        )?;

        let api_key = env::var("SHOE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let log_level =
            env::var("SHOE_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        let log_format = match env::var("SHOE_LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };

        Ok(Self {
            base_url,
            api_key,
            log_level,
            log_format,
        })
    }
}

/// Parse and check a base URL: it must be http(s) and able to carry path segments.
pub fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    check_base_url(&url)?;
    Ok(url)
}

/// The checks of [`parse_base_url`] for an already-parsed URL.
pub fn check_base_url(url: &Url) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: url.to_string(),
        reason,
    };

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_string()));
    }
    Ok(())
}
