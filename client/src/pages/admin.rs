//! Body of an admin page inside the shell.
//!
//! Listing and management screens are served by dedicated views; this body
//! renders the page heading and, on the profile page, the signed-in principal.

use leptos::prelude::*;

use crate::pages::page::Page;
use crate::state::auth::AuthState;

#[component]
pub fn AdminPage(page: Page) -> impl IntoView {
    let body = match page {
        Page::Profile => view! { <ProfileSummary/> }.into_any(),
        Page::Dashboard
        | Page::Users
        | Page::Drivers
        | Page::Trips
        | Page::Financial
        | Page::Reports
        | Page::Settings => ().into_any(),
    };

    view! {
        <section class="admin-page" data-page=page.segment()>
            <h1 class="admin-page__title">{page.label()}</h1>
            {body}
        </section>
    }
}

#[component]
fn ProfileSummary() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let user = move || auth.get().current_user;

    view! {
        {move || {
            user()
                .map(|user| {
                    view! {
                        <dl class="profile-summary">
                            <dt>"Nom"</dt>
                            <dd>{user.display_name()}</dd>
                            <dt>"Email"</dt>
                            <dd>{user.email.clone()}</dd>
                            <dt>"Téléphone"</dt>
                            <dd>{user.tel.clone().unwrap_or_else(|| "—".to_owned())}</dd>
                            <dt>"Rôle"</dt>
                            <dd>{user.type_utilisateur.as_str().to_owned()}</dd>
                        </dl>
                    }
                })
        }}
    }
}
