use std::time::Duration;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use super::*;
use crate::config::ServerConfig;

fn state_for(api_target: &str) -> AppState {
    AppState::new(ServerConfig {
        port: 0,
        api_target: api_target.to_owned(),
        proxy_timeout: Duration::from_secs(2),
    })
    .unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let app = api_routes(state_for("http://127.0.0.1:9"));
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unreachable_backend_returns_bad_gateway_envelope() {
    // Port 9 (discard) is not expected to accept connections locally.
    let app = api_routes(state_for("http://127.0.0.1:9"));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"email":"a@b.sn","motDePasse":"x"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn proxy_forwards_to_backend_and_relays_status() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let backend = Router::new().route(
        "/api/auth/login",
        axum::routing::post(|body: String| async move {
            (StatusCode::UNAUTHORIZED, axum::Json(serde_json::json!({ "success": false, "echo": body })))
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, backend).await;
    });

    let app = api_routes(state_for(&format!("http://{addr}")));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .body(Body::from("payload"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["echo"], "payload");
}

#[tokio::test]
async fn unknown_non_api_path_is_not_proxied() {
    let app = api_routes(state_for("http://127.0.0.1:9"));
    let response = app
        .oneshot(Request::builder().uri("/apix").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
