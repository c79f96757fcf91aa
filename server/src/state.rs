//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the loaded configuration and one pooled HTTP client used by the
//! `/api` proxy.

use std::sync::Arc;

use crate::config::{ConfigError, ServerConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state with an HTTP client bounded by the proxy timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the TLS backend fails to initialize.
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { config: Arc::new(config), http })
    }
}
