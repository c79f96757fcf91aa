//! Last-resort error display for the root error boundary.

#[cfg(test)]
#[path = "error_fallback_test.rs"]
mod error_fallback_test;

use std::collections::HashSet;
use std::hash::Hash;

use leptos::prelude::*;

use crate::app::SharedGate;
use crate::util::errors::{ErrorLevel, ErrorReport};

/// `component` context of reports raised by the fallback.
pub const BOUNDARY_COMPONENT: &str = "ErrorBoundary";

pub const UNKNOWN_ERROR_MESSAGE: &str = "Une erreur inattendue est survenue.";

/// Messages to show; an empty error set still explains what happened.
pub fn fallback_messages(messages: Vec<String>) -> Vec<String> {
    let messages: Vec<String> = messages.into_iter().filter(|m| !m.trim().is_empty()).collect();
    if messages.is_empty() { vec![UNKNOWN_ERROR_MESSAGE.to_owned()] } else { messages }
}

/// Messages of errors not seen before, marking them as seen.
pub fn take_unreported<K, I>(seen: &mut HashSet<K>, errors: I) -> Vec<String>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, String)>,
{
    errors.into_iter().filter_map(|(id, message)| seen.insert(id).then_some(message)).collect()
}

#[component]
pub fn ErrorFallback(errors: ArcRwSignal<Errors>) -> impl IntoView {
    let messages = {
        let errors = errors.clone();
        move || {
            fallback_messages(
                errors
                    .get()
                    .into_iter()
                    .map(|(_, error)| error.to_string())
                    .collect(),
            )
        }
    };

    if let Some(gate) = use_context::<SharedGate>() {
        let mut reported = HashSet::new();
        Effect::new(move || {
            let current = errors.get().into_iter().map(|(id, error)| (id, error.to_string()));
            for message in take_unreported(&mut reported, current) {
                gate.with_value(|gate| {
                    gate.reporter().report(
                        ErrorReport::new(ErrorLevel::Error, message).with_context("component", BOUNDARY_COMPONENT),
                    );
                });
            }
        });
    }

    let on_home = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href("/") {
                    log::warn!("navigation to home failed: {e:?}");
                }
            }
        }
    };
    let on_reload = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().reload() {
                    log::warn!("page reload failed: {e:?}");
                }
            }
        }
    };

    view! {
        <div class="error-fallback">
            <h2>"Oups ! Quelque chose s'est mal passé"</h2>
            <ul class="error-fallback__messages">
                {move || messages().into_iter().map(|message| view! { <li>{message}</li> }).collect_view()}
            </ul>
            <div class="error-fallback__actions">
                <button class="error-fallback__home" on:click=on_home>
                    "Revenir à l'accueil"
                </button>
                <button class="error-fallback__reload" on:click=on_reload>
                    "Rafraîchir la page"
                </button>
            </div>
        </div>
    }
}
