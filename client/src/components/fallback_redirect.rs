//! Auth-aware redirect for `/` and unmatched routes.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::install_fallback_redirect;

/// Renders nothing; sends admins to the dashboard and everyone else to login.
#[component]
pub fn FallbackRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_fallback_redirect(auth, use_navigate());
}
