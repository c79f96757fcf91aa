//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` constructs the long-lived services (error reporter, session store,
//! auth gate), provides them as context, and runs the one startup validation
//! pass, along with the page-level error hooks, once mounted in the browser.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::admin_shell::AdminShell;
use crate::components::error_fallback::ErrorFallback;
use crate::components::error_toasts::ErrorToasts;
use crate::components::fallback_redirect::FallbackRedirect;
use crate::config::ClientConfig;
use crate::pages::login::LoginPage;
use crate::pages::page::Page;
use crate::state::auth::{AuthGate, AuthState};
use crate::state::session::SessionStore;
use crate::util::clock::now_millis;
use crate::util::errors::{ErrorReporter, install_global_handlers};
use crate::util::storage::BrowserStorage;

/// Auth gate handle shared through context. The gate holds `Rc` state, so it
/// lives in local (non-`Send`) storage.
pub type SharedGate = StoredValue<AuthGate<BrowserStorage>, LocalStorage>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let reporter = ErrorReporter::new();
    let gate = AuthGate::new(SessionStore::new(BrowserStorage), reporter);
    let auth = RwSignal::new(AuthState::loading());
    let shared_gate: SharedGate = StoredValue::new_local(gate);

    provide_context(auth);
    provide_context(shared_gate);
    provide_context(ClientConfig::from_build_env());

    // Effects only run in the browser, where the stored session lives.
    Effect::new(move || {
        let state = shared_gate.with_value(|gate| {
            install_global_handlers(gate.reporter());
            gate.validate(now_millis())
        });
        auth.set(state);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/yoonbi-admin.css"/>
        <Title text="Yoon-Bi Administration"/>

        <ErrorBoundary fallback=|errors| view! { <ErrorFallback errors/> }>
            <Router>
                <Routes fallback=|| view! { <FallbackRedirect/> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("") view=FallbackRedirect/>
                    <Route path=StaticSegment("dashboard") view=|| view! { <AdminShell page=Page::Dashboard/> }/>
                    <Route path=StaticSegment("users") view=|| view! { <AdminShell page=Page::Users/> }/>
                    <Route path=StaticSegment("drivers") view=|| view! { <AdminShell page=Page::Drivers/> }/>
                    <Route path=StaticSegment("trips") view=|| view! { <AdminShell page=Page::Trips/> }/>
                    <Route path=StaticSegment("financial") view=|| view! { <AdminShell page=Page::Financial/> }/>
                    <Route path=StaticSegment("reports") view=|| view! { <AdminShell page=Page::Reports/> }/>
                    <Route path=StaticSegment("profile") view=|| view! { <AdminShell page=Page::Profile/> }/>
                    <Route path=StaticSegment("settings") view=|| view! { <AdminShell page=Page::Settings/> }/>
                </Routes>
            </Router>
        </ErrorBoundary>
        <ErrorToasts/>
    }
}
