//! Development proxy for the platform backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The admin client talks to the backend through same-origin `/api/*` calls.
//! This handler forwards each request verbatim to `API_TARGET`, keeping the
//! path and query string, so the browser never needs CORS for the backend.
//!
//! ERROR HANDLING
//! ==============
//! Upstream failures (unreachable, timeout, unreadable body) become a `502`
//! with the same `{ success, message }` envelope the backend uses, so the
//! login page shows its "unreachable" message instead of a decode error.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

/// Largest request body forwarded upstream.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("request body rejected: {0}")]
    Body(String),
    #[error("backend unreachable: {0}")]
    Upstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Body(_) => (StatusCode::PAYLOAD_TOO_LARGE, "Requête trop volumineuse."),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "Service indisponible, réessayez plus tard."),
        };
        (status, axum::Json(json!({ "success": false, "message": message }))).into_response()
    }
}

/// Join the backend origin with the incoming path and query.
#[must_use]
pub fn target_url(api_target: &str, path_and_query: &str) -> String {
    let base = api_target.trim_end_matches('/');
    if path_and_query.starts_with('/') {
        format!("{base}{path_and_query}")
    } else {
        format!("{base}/{path_and_query}")
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copy request headers that are safe to forward upstream.
///
/// Drops hop-by-hop headers plus `host` and `content-length`, which the
/// outgoing client recomputes.
#[must_use]
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Response headers passed back to the browser.
#[must_use]
pub fn returnable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Forward any `/api/*` request to the backend.
///
/// # Errors
///
/// Returns [`ProxyError`] when the body cannot be read or the backend does
/// not answer.
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let url = target_url(&state.config.api_target, path_and_query);

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    tracing::debug!(method = %parts.method, %url, "proxying request");

    let upstream = state
        .http
        .request(parts.method.clone(), &url)
        .headers(forwardable_headers(&parts.headers))
        .body(bytes)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(%url, error = %e, "backend request failed");
            ProxyError::Upstream(e.to_string())
        })?;

    let status = upstream.status();
    let headers = returnable_headers(upstream.headers());
    let payload = upstream.bytes().await.map_err(|e| {
        tracing::warn!(%url, error = %e, "backend body read failed");
        ProxyError::Upstream(e.to_string())
    })?;

    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
