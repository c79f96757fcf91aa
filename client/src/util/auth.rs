//! Navigation guard for the protected admin routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The decision functions are pure over `AuthState` and the requested path so
//! every route component applies identical redirect behavior; the Leptos
//! effects at the bottom only carry out what they decide.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_RETURN_PATH: &str = "/dashboard";
pub const RETURN_QUERY_KEY: &str = "from";

/// Outcome of checking a protected route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Initial validation has not finished; render nothing yet.
    Pending,
    Allow,
    /// `from` is the path to come back to after login, when worth keeping.
    RedirectToLogin { from: Option<String> },
}

impl GuardDecision {
    /// Where to navigate, if anywhere.
    #[must_use]
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::RedirectToLogin { from } => Some(login_path(from.as_deref())),
            Self::Pending | Self::Allow => None,
        }
    }
}

/// Decide whether `path` may render under the current auth state.
pub fn guard_route(state: &AuthState, path: &str) -> GuardDecision {
    if state.loading {
        return GuardDecision::Pending;
    }
    if !state.is_authenticated {
        // After a logout the page belonged to the previous admin.
        let from = (!state.signed_out).then(|| path.to_owned());
        return GuardDecision::RedirectToLogin { from };
    }
    // Unreachable through the auth gate, which never authenticates a
    // non-admin; kept for callers that set the state directly.
    if !state.is_admin() {
        return GuardDecision::RedirectToLogin { from: None };
    }
    GuardDecision::Allow
}

/// `/login`, or `/login?from=<encoded path>` when a return path is known.
pub fn login_path(from: Option<&str>) -> String {
    match from.filter(|path| is_safe_return_path(path)) {
        Some(path) => format!("{LOGIN_PATH}?{RETURN_QUERY_KEY}={}", urlencoding::encode(path)),
        None => LOGIN_PATH.to_owned(),
    }
}

/// Same-origin absolute path that is not the login page itself.
fn is_safe_return_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && path != "/"
        && path != LOGIN_PATH
        && !path.starts_with("/login?")
        && !path.starts_with("/login/")
}

/// Resolve the post-login destination from the raw `from` query value.
pub fn sanitize_return_path(raw: Option<&str>) -> String {
    raw.filter(|path| is_safe_return_path(path))
        .map_or_else(|| DEFAULT_RETURN_PATH.to_owned(), str::to_owned)
}

/// An authenticated admin landing on `/login` is sent on to `from`.
pub fn login_route_redirect(state: &AuthState, from: Option<&str>) -> Option<String> {
    state.is_admin().then(|| sanitize_return_path(from))
}

/// Target for `/` and unknown paths once validation has finished.
pub fn fallback_target(state: &AuthState) -> Option<&'static str> {
    if state.loading {
        None
    } else if state.is_admin() {
        Some(DEFAULT_RETURN_PATH)
    } else {
        Some(LOGIN_PATH)
    }
}

fn replace_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect away from a protected subtree whenever the guard says so.
pub fn install_route_guard<P, F>(auth: RwSignal<AuthState>, path: P, navigate: F)
where
    P: Fn() -> String + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        let requested = path();
        if let Some(target) = guard_route(&state, &requested).redirect_target() {
            log::debug!("guard: {requested} -> {target}");
            navigate(&target, replace_options());
        }
    });
}

/// Send an already-authenticated admin from `/login` to the return path.
pub fn install_login_redirect<Q, F>(auth: RwSignal<AuthState>, from: Q, navigate: F)
where
    Q: Fn() -> Option<String> + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if let Some(target) = login_route_redirect(&state, from().as_deref()) {
            navigate(&target, replace_options());
        }
    });
}

/// Auth-aware redirect for `/` and unmatched paths.
pub fn install_fallback_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = fallback_target(&auth.get()) {
            navigate(target, replace_options());
        }
    });
}
