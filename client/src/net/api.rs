//! REST calls to the Yoon-Bi backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: calls fail with
//! [`ApiError::Unavailable`] since authentication only happens in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport, status and decode failures are distinct [`ApiError`] variants so
//! the login flow can pick the right user-facing message. A non-2xx body that
//! carries a `message` field keeps that message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use super::types::{LoginRequest, LoginResponse};

/// Failure talking to the backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Message supplied by the backend, if the failure carried one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The external credential-exchange collaborator.
///
/// The browser build talks HTTP through [`HttpAuthEndpoint`]; tests script
/// responses with their own implementation.
pub trait AuthEndpoint {
    fn authenticate(&self, request: &LoginRequest) -> impl Future<Output = Result<LoginResponse, ApiError>>;
}

/// Build the login URL under the configured API prefix.
pub fn login_endpoint(api_prefix: &str) -> String {
    format!("{}/auth/login", api_prefix.trim_end_matches('/'))
}

/// Pull the `message` field out of an error body, ignoring non-JSON bodies.
#[cfg(any(test, feature = "hydrate"))]
fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() { None } else { Some(message.to_owned()) }
}

/// [`AuthEndpoint`] backed by `POST {api_prefix}/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpAuthEndpoint {
    url: String,
}

impl HttpAuthEndpoint {
    #[must_use]
    pub fn new(api_prefix: &str) -> Self {
        Self { url: login_endpoint(api_prefix) }
    }
}

impl AuthEndpoint for HttpAuthEndpoint {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            log::debug!("POST {}", self.url);
            let resp = gloo_net::http::Request::post(&self.url)
                .json(request)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                log::warn!("POST {} failed with status {status}", self.url);
                return Err(ApiError::Status { status, message: error_message_from_body(&body) });
            }
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let via = if request.email.is_some() { "email" } else { "tel" };
            log::debug!("POST {} ({via}) skipped outside the browser", self.url);
            Err(ApiError::Unavailable)
        }
    }
}
