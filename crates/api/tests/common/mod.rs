#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cleanpro_api::config::ServerConfig;
use cleanpro_api::router::build_app_router;
use cleanpro_api::state::AppState;
use cleanpro_db::seed::FixtureSet;

/// Build a test `ServerConfig` with safe defaults.
///
/// Payments complete without the simulated delay so the checkout tests stay
/// fast.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        payment_delay_ms: 0,
        database_url: "sqlite::memory:".to_string(),
        checkout_capacity: 1_000,
        checkout_ttl_secs: 3_600,
    }
}

/// Build the full application router over a fresh, migrated in-memory
/// database.
///
/// Uses the same `build_app_router` as `main.rs` so integration tests
/// exercise the production middleware stack.
pub async fn build_test_app() -> Router {
    build_test_app_with(test_config()).await
}

/// Like [`build_test_app`], with a caller-supplied configuration.
pub async fn build_test_app_with(config: ServerConfig) -> Router {
    let pool = cleanpro_db::connect_in_memory().await.unwrap();
    cleanpro_db::run_migrations(&pool).await.unwrap();
    build_app_router(AppState::new(pool, config.clone()), &config).unwrap()
}

/// Like [`build_test_app`], with the development fixtures loaded.
pub async fn build_seeded_app() -> Router {
    let pool = cleanpro_db::connect_in_memory().await.unwrap();
    cleanpro_db::run_migrations(&pool).await.unwrap();
    cleanpro_db::seed::run(&pool, FixtureSet::Development)
        .await
        .unwrap();
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
