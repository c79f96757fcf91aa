//! Login flow: credential exchange, response validation, session hand-off.
//!
//! SYSTEM CONTEXT
//! ==============
//! Driven by the login page. On success the session is written before the
//! auth gate is told about the new principal, so any later read observes it.
//! Only one submission may be in flight per flow instance.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::net::api::{ApiError, AuthEndpoint};
use crate::net::types::{LoginRequest, LoginResponse, User};
use crate::state::auth::{AuthGate, AuthState};
use crate::util::errors::{ErrorLevel, ErrorReport};
use crate::util::storage::KeyValueStorage;

pub const MSG_MISSING_INPUT: &str = "Veuillez saisir votre identifiant et votre mot de passe.";
pub const MSG_BAD_CREDENTIALS: &str = "Email ou mot de passe incorrect";
pub const MSG_UNREACHABLE: &str = "Impossible de joindre le serveur. Veuillez réessayer.";
pub const MSG_MALFORMED_RESPONSE: &str = "Réponse du serveur invalide : jeton ou utilisateur manquant.";
pub const MSG_ADMIN_ONLY: &str = "Accès réservé aux administrateurs.";
pub const MSG_BUSY: &str = "Connexion déjà en cours...";

/// User-facing login failure. `Display` is the inline form message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("{}", MSG_MISSING_INPUT)]
    MissingInput,
    #[error("{0}")]
    Rejected(String),
    #[error("{}", MSG_MALFORMED_RESPONSE)]
    MalformedResponse,
    #[error("{}", MSG_ADMIN_ONLY)]
    AdminOnly,
    #[error("{}", MSG_BUSY)]
    Busy,
    #[error("Impossible d'enregistrer la session : {0}")]
    Storage(String),
}

/// Trim the identifier and require both fields.
///
/// # Errors
///
/// Returns [`LoginError::MissingInput`] when either field is blank.
pub fn validate_login_input(identifier: &str, password: &str) -> Result<(String, String), LoginError> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Err(LoginError::MissingInput);
    }
    Ok((identifier.to_owned(), password.to_owned()))
}

/// `password`, `passwordHash`, `motDePasse`, `mot_de_passe`, ...
pub fn is_password_field(key: &str) -> bool {
    let normalized: String = key
        .chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();
    normalized.contains("password") || normalized.contains("motdepasse")
}

/// Remove password-like keys at every nesting level.
pub fn strip_password_fields(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|key, _| !is_password_field(key));
            map.values_mut().for_each(strip_password_fields);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_password_fields),
        _ => {}
    }
}

/// Turn the endpoint result into a storable `(token, user)` pair.
///
/// # Errors
///
/// [`LoginError::Rejected`] for transport failures and unsuccessful answers,
/// [`LoginError::MalformedResponse`] when a successful answer lacks a token
/// or a parseable user.
pub fn resolve_login_response(result: Result<LoginResponse, ApiError>) -> Result<(String, User), LoginError> {
    let response = match result {
        Ok(response) => response,
        Err(e @ ApiError::Status { .. }) => {
            let message = e.backend_message().map_or_else(|| MSG_BAD_CREDENTIALS.to_owned(), str::to_owned);
            return Err(LoginError::Rejected(message));
        }
        Err(ApiError::Network(_) | ApiError::Unavailable) => {
            return Err(LoginError::Rejected(MSG_UNREACHABLE.to_owned()));
        }
        Err(ApiError::Decode(_)) => return Err(LoginError::MalformedResponse),
    };

    if response.success != Some(true) {
        let message = response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| MSG_BAD_CREDENTIALS.to_owned());
        return Err(LoginError::Rejected(message));
    }

    let token = response.token.filter(|t| !t.is_empty()).ok_or(LoginError::MalformedResponse)?;
    let mut raw_user = match response.user {
        Some(serde_json::Value::Null) | None => return Err(LoginError::MalformedResponse),
        Some(raw) => raw,
    };
    strip_password_fields(&mut raw_user);
    let user: User = serde_json::from_value(raw_user).map_err(|_| LoginError::MalformedResponse)?;
    Ok((token, user))
}

/// Clears the in-flight flag however `submit` exits.
struct InFlight(Rc<Cell<bool>>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// One login form's submission state.
#[derive(Clone, Debug)]
pub struct LoginFlow<S> {
    gate: AuthGate<S>,
    in_flight: Rc<Cell<bool>>,
}

impl<S: KeyValueStorage> LoginFlow<S> {
    pub fn new(gate: AuthGate<S>) -> Self {
        Self { gate, in_flight: Rc::new(Cell::new(false)) }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    /// Exchange credentials for a session.
    ///
    /// On success the session is stored and the authenticated admin state is
    /// returned. A non-admin principal is stored, then immediately cleared.
    ///
    /// # Errors
    ///
    /// See [`LoginError`]; apart from the non-admin case the stored session
    /// is left untouched on failure.
    pub async fn submit<E: AuthEndpoint>(
        &self,
        endpoint: &E,
        identifier: &str,
        password: &str,
    ) -> Result<AuthState, LoginError> {
        let (identifier, password) = validate_login_input(identifier, password)?;
        if self.in_flight.replace(true) {
            return Err(LoginError::Busy);
        }
        let _in_flight = InFlight(Rc::clone(&self.in_flight));

        let request = LoginRequest::from_identifier(&identifier, &password);
        let result = endpoint.authenticate(&request).await;
        if let Err(e @ (ApiError::Network(_) | ApiError::Decode(_))) = &result {
            self.gate.reporter().report(
                ErrorReport::new(ErrorLevel::Warning, format!("login request failed: {e}"))
                    .with_context("component", "LoginFlow"),
            );
        }
        let (token, user) = resolve_login_response(result).inspect_err(|e| log::info!("login failed: {e}"))?;

        let saved = self.gate.store().save(&token, &user);
        let state = self.gate.accept_login(user);
        if !state.is_admin() {
            return Err(LoginError::AdminOnly);
        }
        saved.map_err(|e| LoginError::Storage(e.to_string()))?;
        Ok(state)
    }
}
