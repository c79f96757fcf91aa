//! Authenticated admin layout: sidebar, header, logout, page body.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route renders through this shell, which installs the
//! route guard and only mounts the page body once the guard allows it.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::SharedGate;
use crate::pages::admin::AdminPage;
use crate::pages::page::Page;
use crate::state::auth::{AuthGate, AuthState};
use crate::util::auth::{GuardDecision, guard_route, install_route_guard};

#[component]
pub fn AdminShell(page: Page) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let gate = expect_context::<SharedGate>();
    let location = use_location();
    let pathname = location.pathname;

    install_route_guard(auth, move || pathname.get(), use_navigate());

    let allowed = move || guard_route(&auth.get(), &pathname.get()) == GuardDecision::Allow;
    let display_name = move || {
        auth.get()
            .current_user
            .map(|user| user.display_name())
            .unwrap_or_default()
    };
    // The guard effect takes care of leaving the page once state flips.
    let on_logout = move |_| {
        log::info!("admin logged out");
        auth.set(gate.with_value(AuthGate::logout));
    };

    view! {
        <Show when=allowed>
            <div class="admin-layout">
                <aside class="admin-sidebar">
                    <div class="admin-sidebar__brand">"Yoon-Bi"</div>
                    <nav class="admin-nav">
                        {Page::ALL
                            .into_iter()
                            .map(|entry| {
                                view! {
                                    <a
                                        href=entry.path()
                                        class="admin-nav__link"
                                        class:active=move || Page::active_for(&pathname.get()) == entry
                                    >
                                        {entry.label()}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </nav>
                    <button class="admin-sidebar__logout" on:click=on_logout>
                        "Déconnexion"
                    </button>
                </aside>
                <main class="admin-main">
                    <header class="admin-header">
                        <span class="admin-header__user">{display_name}</span>
                    </header>
                    <AdminPage page/>
                </main>
            </div>
        </Show>
    }
}
