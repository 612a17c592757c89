#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use carbontune_api::config::{RegionLoadConfig, RegionSource, ServerConfig};
use carbontune_api::router::build_app_router;
use carbontune_api::state::AppState;
use carbontune_core::carbon_intensity::RegionCarbonIntensity;
use carbontune_core::knowledge_base::KnowledgeBase;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Regions preloaded into test apps.
pub const TEST_REGIONS: &[(&str, f64)] = &[
    ("France", 56.04),
    ("India", 713.44),
    ("Poland", 661.93),
    ("World", 480.57),
];

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        regions: RegionLoadConfig {
            source: RegionSource::File("unused.csv".to_string()),
            attempts: 1,
            retry_delay: Duration::ZERO,
        },
    }
}

/// App whose region table is still loading.
pub fn build_loading_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// App with [`TEST_REGIONS`] already published.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    let regions: RegionCarbonIntensity = TEST_REGIONS.iter().copied().collect();
    state
        .knowledge
        .set(KnowledgeBase::new(regions))
        .unwrap_or_else(|_| panic!("fresh state already had a knowledge base"));
    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// A valid record submission body.
pub fn record_body(model: &str, gpu: &str, emissions: f64, runtime: f64) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "task": "Question Answering",
        "gpu": gpu,
        "energy": 0.05,
        "emissions": emissions,
        "runtime": runtime,
        "github_user": "octocat",
    })
}
