//! # client
//!
//! Leptos + WASM admin dashboard for the Yoon-Bi ride-sharing platform.
//!
//! The core of this crate is the session gate: persisted session storage,
//! startup validation of the stored bearer token, the route guard protecting
//! the admin pages, and the login flow that creates a session. Pages render
//! inside an admin shell over a closed set of page identifiers.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Warn };
    if let Err(e) = console_log::init_with_level(level) {
        leptos::logging::warn!("console logger not installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
