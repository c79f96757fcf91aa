mod config;
mod proxy;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is fine; real deployments set variables directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");
    let port = config.port;
    let api_target = config.api_target.clone();

    let state = state::AppState::new(config).expect("state init failed");
    let app = routes::leptos_app(state).expect("router init failed");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, %api_target, "yoonbi admin listening");
    axum::serve(listener, app).await.expect("server failed");
}
