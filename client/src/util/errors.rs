//! Application error reporting.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`ErrorReporter`] is constructed by the root `App` and handed to
//! whoever needs it through Leptos context. Reports are written to the `log`
//! facade at a level matching their severity and fanned out to subscribers;
//! the `ErrorToasts` area is the one the app installs. Uncaught page errors
//! and unhandled rejections are routed in by [`install_global_handlers`].

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub const UNKNOWN_REJECTION_MESSAGE: &str = "Une erreur inconnue est survenue dans une promesse";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorLevel {
    #[default]
    Error,
    Warning,
    Info,
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        })
    }
}

/// A single reported problem with free-form context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub level: ErrorLevel,
    pub context: BTreeMap<String, String>,
}

impl ErrorReport {
    pub fn new(level: ErrorLevel, message: impl Into<String>) -> Self {
        Self { message: message.into(), level, context: BTreeMap::new() }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Handle returned by [`ErrorReporter::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&ErrorReport)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// Fan-out error sink. Clones share the same listener list.
#[derive(Clone, Default)]
pub struct ErrorReporter {
    listeners: Rc<RefCell<Listeners>>,
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ErrorReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&ErrorReport) + 'static) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    pub fn report(&self, report: ErrorReport) {
        match report.level {
            ErrorLevel::Error => log::error!("[{}] {} {:?}", report.level, report.message, report.context),
            ErrorLevel::Warning => log::warn!("[{}] {} {:?}", report.level, report.message, report.context),
            ErrorLevel::Info => log::info!("[{}] {} {:?}", report.level, report.message, report.context),
        }

        // Snapshot so listeners may (un)subscribe while being notified.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(&report);
        }
    }
}

/// Message for an unhandled promise rejection, given its reason if readable.
pub fn rejection_message(reason: Option<String>) -> String {
    reason
        .map(|r| r.trim().to_owned())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| UNKNOWN_REJECTION_MESSAGE.to_owned())
}

/// Route uncaught page errors and unhandled rejections into `reporter`.
///
/// Call once per page; the listeners live as long as the window.
#[cfg(feature = "hydrate")]
pub fn install_global_handlers(reporter: &ErrorReporter) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };

    let on_error = {
        let reporter = reporter.clone();
        Closure::<dyn Fn(web_sys::ErrorEvent)>::new(move |event: web_sys::ErrorEvent| {
            reporter.report(
                ErrorReport::new(ErrorLevel::Error, event.message())
                    .with_context("filename", event.filename())
                    .with_context("lineno", event.lineno().to_string())
                    .with_context("colno", event.colno().to_string()),
            );
        })
    };
    let on_rejection = {
        let reporter = reporter.clone();
        Closure::<dyn Fn(web_sys::PromiseRejectionEvent)>::new(move |event: web_sys::PromiseRejectionEvent| {
            let reason = event.reason();
            let readable = reason
                .as_string()
                .or_else(|| reason.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())));
            reporter.report(
                ErrorReport::new(ErrorLevel::Error, rejection_message(readable))
                    .with_context("source", "unhandledrejection"),
            );
        })
    };

    for (kind, callback) in [("error", on_error.as_ref()), ("unhandledrejection", on_rejection.as_ref())] {
        if let Err(e) = window.add_event_listener_with_callback(kind, callback.unchecked_ref()) {
            log::warn!("cannot listen for {kind}: {e:?}");
        }
    }
    on_error.forget();
    on_rejection.forget();
}

/// No page to listen on outside the browser.
#[cfg(not(feature = "hydrate"))]
pub fn install_global_handlers(_reporter: &ErrorReporter) {}
