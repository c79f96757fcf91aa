//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos admin application (SSR + hydration
//! assets under `/pkg`) and proxies `/api/*` to the platform backend so the
//! browser only ever talks to a single origin.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ConfigError;
use crate::proxy;
use crate::state::AppState;

/// Health check and backend proxy.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api", any(proxy::forward))
        .route("/api/{*path}", any(proxy::forward))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR + static hydration assets.
///
/// # Errors
///
/// Returns [`ConfigError::Leptos`] if the `[workspace.metadata.leptos]`
/// section cannot be loaded.
pub fn leptos_app(state: AppState) -> Result<Router, ConfigError> {
    let conf = get_configuration(None).map_err(|e| ConfigError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
