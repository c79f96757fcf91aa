//! Administrator login page (email or phone number + password).
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or through the route guard, which passes the originally
//! requested path as `?from=`. A successful login updates the shared auth
//! state; the login redirect effect then navigates to that path.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

#[cfg(feature = "hydrate")]
use crate::app::SharedGate;
#[cfg(feature = "hydrate")]
use crate::config::ClientConfig;
#[cfg(feature = "hydrate")]
use crate::net::api::HttpAuthEndpoint;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::login::LoginFlow;
use crate::state::login::validate_login_input;
use crate::util::auth::{RETURN_QUERY_KEY, install_login_redirect};

fn submit_label(busy: bool) -> &'static str {
    if busy { "Connexion en cours..." } else { "Se connecter" }
}

fn password_input_type(visible: bool) -> &'static str {
    if visible { "text" } else { "password" }
}

fn password_toggle_label(visible: bool) -> &'static str {
    if visible { "Masquer" } else { "Afficher" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let query = use_query_map();

    install_login_redirect(auth, move || query.with(|q| q.get(RETURN_QUERY_KEY)), use_navigate());

    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Credentials are only ever exchanged from the browser.
    #[cfg(feature = "hydrate")]
    let flow = {
        let gate = expect_context::<SharedGate>();
        StoredValue::new_local(gate.with_value(|gate| LoginFlow::new(gate.clone())))
    };
    #[cfg(feature = "hydrate")]
    let endpoint = StoredValue::new(HttpAuthEndpoint::new(&expect_context::<ClientConfig>().api_prefix));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let identifier_value = identifier.get_untracked();
        let password_value = password.get_untracked();
        if let Err(e) = validate_login_input(&identifier_value, &password_value) {
            error.set(e.to_string());
            return;
        }
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let flow = flow.get_value();
            let endpoint = endpoint.get_value();
            match flow.submit(&endpoint, &identifier_value, &password_value).await {
                Ok(state) => {
                    password.set(String::new());
                    auth.set(state);
                }
                Err(e) => error.set(e.to_string()),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            log::debug!("login for {identifier_value} ignored outside the browser");
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Connexion Administrateur"</h1>
                <p class="login-card__subtitle">"Connectez-vous pour accéder au dashboard"</p>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || !error.get().is_empty()>
                        <p class="login-message login-message--error" role="alert">
                            {move || error.get()}
                        </p>
                    </Show>
                    <label class="login-label" for="identifier">
                        "Email ou téléphone"
                    </label>
                    <input
                        id="identifier"
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="admin@yoon-bi.sn"
                        required=true
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev))
                    />
                    <label class="login-label" for="password">
                        "Mot de passe"
                    </label>
                    <div class="login-password">
                        <input
                            id="password"
                            class="login-input"
                            type=move || password_input_type(show_password.get())
                            autocomplete="current-password"
                            required=true
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button
                            class="login-password__toggle"
                            type="button"
                            on:click=move |_| show_password.update(|visible| *visible = !*visible)
                        >
                            {move || password_toggle_label(show_password.get())}
                        </button>
                    </div>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                </form>
            </div>
            <p class="login-footer">"© 2025 Yoon-Bi. Tous droits réservés."</p>
        </div>
    }
}
