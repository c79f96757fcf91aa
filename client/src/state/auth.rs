//! Auth gate: the single source of truth for "is there a valid admin session".
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` runs [`AuthGate::validate`] once on mount and publishes the result as
//! an `RwSignal<AuthState>`. The login flow and the shell's logout button are
//! the only other writers. Route guards and pages only read the signal.
//!
//! ERROR HANDLING
//! ==============
//! Every startup failure is fail-closed: the stored session is cleared and the
//! state becomes unauthenticated. Failures are logged and reported at `Info`
//! level only; they never surface as a user-facing alert.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;
use crate::state::session::{SessionStore, StoredSession};
use crate::util::errors::{ErrorLevel, ErrorReport, ErrorReporter};
use crate::util::storage::KeyValueStorage;
use crate::util::token::{self, TokenError};

/// Authentication state shared with the rest of the app.
///
/// The default is the `Loading` state the app starts in.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub current_user: Option<User>,
    /// True only during the initial validation pass.
    pub loading: bool,
    /// Set by an explicit logout; the guard then drops the return path.
    pub signed_out: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::loading()
    }
}

impl AuthState {
    #[must_use]
    pub fn loading() -> Self {
        Self { is_authenticated: false, current_user: None, loading: true, signed_out: false }
    }

    #[must_use]
    pub fn authenticated(user: User) -> Self {
        Self { is_authenticated: true, current_user: Some(user), loading: false, signed_out: false }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self { is_authenticated: false, current_user: None, loading: false, signed_out: false }
    }

    /// Unauthenticated after the admin chose to leave.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { signed_out: true, ..Self::unauthenticated() }
    }

    /// Authenticated with an `ADMIN` principal.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.current_user.as_ref().is_some_and(User::is_admin)
    }
}

/// Why a stored session was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionRejection {
    #[error("no complete stored session")]
    Missing,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("principal role {0} is not ADMIN")]
    NotAdmin(String),
}

/// Owns `AuthState` transitions over an injected session store.
#[derive(Clone, Debug)]
pub struct AuthGate<S> {
    store: SessionStore<S>,
    reporter: ErrorReporter,
}

impl<S: KeyValueStorage> AuthGate<S> {
    pub fn new(store: SessionStore<S>, reporter: ErrorReporter) -> Self {
        Self { store, reporter }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    /// Read-only check of the stored session against `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns the first failed condition: missing pair, bad token shape or
    /// payload, expiry, then role.
    pub fn check_session(&self, now_ms: i64) -> Result<StoredSession, SessionRejection> {
        let session = self.store.load().ok_or(SessionRejection::Missing)?;
        token::check_token(&session.token, now_ms)?;
        if !session.user.is_admin() {
            return Err(SessionRejection::NotAdmin(session.user.type_utilisateur.as_str().to_owned()));
        }
        Ok(session)
    }

    /// `Loading -> Authenticated | Unauthenticated`. Clears storage on failure.
    pub fn validate(&self, now_ms: i64) -> AuthState {
        match self.check_session(now_ms) {
            Ok(session) => {
                log::debug!("session restored for user {}", session.user.id);
                AuthState::authenticated(session.user)
            }
            Err(SessionRejection::Missing) if !self.store.has_any() => AuthState::unauthenticated(),
            Err(rejection) => {
                self.store.clear();
                self.reporter.report(
                    ErrorReport::new(ErrorLevel::Info, format!("stored session discarded: {rejection}"))
                        .with_context("component", "AuthGate"),
                );
                AuthState::unauthenticated()
            }
        }
    }

    /// Trust a freshly completed login; only the role is re-checked.
    pub fn accept_login(&self, user: User) -> AuthState {
        if user.is_admin() {
            AuthState::authenticated(user)
        } else {
            log::info!("login refused for non-admin role {}", user.type_utilisateur.as_str());
            self.store.clear();
            AuthState::unauthenticated()
        }
    }

    pub fn logout(&self) -> AuthState {
        self.store.clear();
        AuthState::signed_out()
    }
}
