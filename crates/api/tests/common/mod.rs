#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use medboard_api::catalog::builtin_catalog;
use medboard_api::config::ServerConfig;
use medboard_api::router::build_app_router;
use medboard_api::state::AppState;
use medboard_core::WidgetCatalog;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        widget_catalog_path: None,
    }
}

/// Build the shared state around the built-in catalog.
pub fn test_state() -> AppState {
    AppState::new(test_config(), builtin_catalog())
}

/// Build the full application router for `state`.
///
/// Tests that issue several requests against the same store clone the
/// state and build one router per request.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

/// Build a router serving `catalog` instead of the built-in one.
pub fn build_app_with_catalog(catalog: WidgetCatalog) -> Router {
    build_test_app(AppState::new(test_config(), catalog))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the full response body.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Read the full response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
