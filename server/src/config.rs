//! Server configuration from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read once at startup after `.env` is loaded. `API_TARGET` is the platform
//! backend that `/api/*` is proxied to.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_API_TARGET: &str = "http://localhost:3000";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid API_TARGET: {0}")]
    InvalidTarget(String),
    #[error("invalid PROXY_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
    #[error("http client: {0}")]
    HttpClient(String),
    #[error("leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend origin without a trailing slash.
    pub api_target: String,
    pub proxy_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_target: DEFAULT_API_TARGET.to_owned(),
            proxy_timeout: Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Load from `PORT`, `API_TARGET`, `PROXY_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first malformed variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let api_target = match get("API_TARGET") {
            Some(raw) => parse_target(&raw)?,
            None => defaults.api_target,
        };
        let proxy_timeout = match get("PROXY_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => defaults.proxy_timeout,
        };

        Ok(Self { port, api_target, proxy_timeout })
    }
}

fn parse_target(raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw).map_err(|e| ConfigError::InvalidTarget(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidTarget(format!("{raw}: scheme must be http or https")));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}
