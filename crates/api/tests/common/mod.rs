//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use depot_api::config::ServerConfig;
use depot_api::extract::USER_ID_HEADER;
use depot_api::ports::{PgDisplayNames, PgNotificationSink};
use depot_api::router::build_app_router;
use depot_api::state::AppState;
use depot_notify::catalog;
use depot_notify::{Dispatcher, DispatcherHandle, Renderer};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the production router over the given pool, plus the dispatcher
/// handle wired into it.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack and the same Postgres port adapters the binary uses. The returned
/// handle lets tests drain pending notification work (`shutdown().await`)
/// before asserting on persisted rows.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<DispatcherHandle>) {
    let config = test_config();

    let renderer = Renderer::new(Arc::new(catalog::builtin()));
    let dispatcher = Dispatcher::start(
        renderer,
        PgNotificationSink::new(pool.clone()),
        PgDisplayNames::new(pool.clone()),
        64,
        2,
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        dispatcher: Arc::clone(&dispatcher),
    };

    (build_app_router(state, &config), dispatcher)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request with the given caller identity.
pub async fn get(app: Router, uri: &str, user_id: i64) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with no identity header.
pub async fn get_anon(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an empty-bodied POST with the given caller identity.
pub async fn post(app: Router, uri: &str, user_id: i64) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON PUT with the given caller identity.
pub async fn put_json(app: Router, uri: &str, user_id: i64, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(USER_ID_HEADER, user_id.to_string())
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
