//! Build-time client configuration.
//!
//! The API prefix is baked in at compile time from `YOONBI_API_PREFIX` so the
//! WASM bundle needs no runtime lookup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every backend call, without a trailing slash.
    pub api_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_prefix: DEFAULT_API_PREFIX.to_owned() }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::with_prefix(option_env!("YOONBI_API_PREFIX"))
    }

    /// Blank values fall back to [`DEFAULT_API_PREFIX`].
    #[must_use]
    pub fn with_prefix(prefix: Option<&str>) -> Self {
        match prefix.map(str::trim).filter(|p| !p.is_empty()) {
            Some(prefix) => Self { api_prefix: prefix.trim_end_matches('/').to_owned() },
            None => Self::default(),
        }
    }
}
