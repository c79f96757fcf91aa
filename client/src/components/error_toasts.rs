//! Dismissable notices for error-level reports.
//!
//! SYSTEM CONTEXT
//! ==============
//! Subscribes to the app's `ErrorReporter` for as long as it is mounted.
//! Warnings and info reports only go to the log; errors also surface here so
//! failures outside the root error boundary are visible to the admin.

#[cfg(test)]
#[path = "error_toasts_test.rs"]
mod error_toasts_test;

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::app::SharedGate;
use crate::components::error_fallback::BOUNDARY_COMPONENT;
use crate::util::errors::{ErrorLevel, ErrorReport};

/// Oldest notices are dropped past this many.
pub const MAX_TOASTS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Error reports, except those the boundary fallback already displays.
pub fn is_toastworthy(report: &ErrorReport) -> bool {
    report.level == ErrorLevel::Error
        && !report.message.trim().is_empty()
        && report.context.get("component").map(String::as_str) != Some(BOUNDARY_COMPONENT)
}

/// Append a notice for `report`, keeping at most [`MAX_TOASTS`].
pub fn push_toast(toasts: &mut Vec<Toast>, id: u64, report: &ErrorReport) {
    toasts.push(Toast { id, message: report.message.trim().to_owned() });
    if toasts.len() > MAX_TOASTS {
        let overflow = toasts.len() - MAX_TOASTS;
        toasts.drain(..overflow);
    }
}

pub fn dismiss_toast(toasts: &mut Vec<Toast>, id: u64) {
    toasts.retain(|toast| toast.id != id);
}

#[component]
pub fn ErrorToasts() -> impl IntoView {
    let gate = expect_context::<SharedGate>();
    let toasts = RwSignal::new(Vec::<Toast>::new());
    let next_id = Rc::new(Cell::new(0_u64));

    let listener = gate.with_value(|gate| {
        gate.reporter().subscribe(move |report| {
            if is_toastworthy(report) {
                let id = next_id.replace(next_id.get() + 1);
                toasts.update(|list| push_toast(list, id, report));
            }
        })
    });
    on_cleanup(move || {
        if gate.try_with_value(|gate| gate.reporter().unsubscribe(listener)).is_none() {
            log::debug!("error reporter disposed before toasts");
        }
    });

    view! {
        <div class="error-toasts" role="status" aria-live="polite">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class="error-toast">
                            <span class="error-toast__message">{toast.message}</span>
                            <button
                                class="error-toast__close"
                                type="button"
                                aria-label="Fermer"
                                on:click=move |_| toasts.update(|list| dismiss_toast(list, id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
