//! Bearer-token inspection: shape check, payload decode, expiry.
//!
//! DESIGN
//! ======
//! The token is never verified cryptographically here (the backend does
//! that on every call). The client only decides whether a stored token is
//! worth presenting: it must look like `header.payload.signature`, the
//! payload must decode to a JSON object, and a present `exp` claim must not
//! be in the past.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use regex::Regex;

/// Segments 1-2 use the base64url alphabet; the signature segment also admits
/// `+`, `/` and `.`, and may be empty.
static TOKEN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9\-_=]+\.[A-Za-z0-9\-_=]+\.[A-Za-z0-9\-_.+/=]*$").expect("token shape pattern is valid")
});

/// Why a stored token was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a three-segment bearer token")]
    Malformed,
    #[error("token payload is not valid base64url: {0}")]
    PayloadEncoding(String),
    #[error("token payload is not a JSON object")]
    PayloadJson,
    #[error("token `exp` claim is not a number")]
    InvalidExpiry,
    #[error("token expired at {exp} (now {now_ms} ms)")]
    Expired { exp: i64, now_ms: i64 },
}

/// Claims the client cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenClaims {
    /// Expiry in Unix seconds, when the token carries one.
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// A token stays usable through the exact millisecond of `exp * 1000`.
    #[must_use]
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp.is_some_and(|exp| exp.saturating_mul(1000) < now_ms)
    }
}

#[must_use]
pub fn has_valid_shape(token: &str) -> bool {
    TOKEN_SHAPE.is_match(token)
}

/// Decode and type the payload segment.
///
/// # Errors
///
/// Returns [`TokenError`] when the token shape is wrong, the payload is not
/// base64url, is not a JSON object, or carries a non-numeric `exp`.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    if !has_valid_shape(token) {
        return Err(TokenError::Malformed);
    }
    let payload = token.split('.').nth(1).ok_or(TokenError::Malformed)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::PayloadEncoding(e.to_string()))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|_| TokenError::PayloadJson)?;
    let claims = value.as_object().ok_or(TokenError::PayloadJson)?;

    let exp = match claims.get("exp") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(number)) => Some(exp_seconds(number)?),
        Some(_) => return Err(TokenError::InvalidExpiry),
    };
    Ok(TokenClaims { exp })
}

fn exp_seconds(number: &serde_json::Number) -> Result<i64, TokenError> {
    if let Some(int) = number.as_i64() {
        return Ok(int);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    if let Some(float) = number.as_f64()
        && float.is_finite()
        && float >= i64::MIN as f64
        && float <= i64::MAX as f64
    {
        return Ok(float.floor() as i64);
    }
    Err(TokenError::InvalidExpiry)
}

/// Full client-side check: shape, payload, and expiry against `now_ms`.
///
/// # Errors
///
/// Returns the first [`TokenError`] encountered.
pub fn check_token(token: &str, now_ms: i64) -> Result<TokenClaims, TokenError> {
    let claims = decode_claims(token)?;
    if let Some(exp) = claims.exp
        && claims.is_expired_at(now_ms)
    {
        return Err(TokenError::Expired { exp, now_ms });
    }
    Ok(claims)
}
