//! Общие помощники для интеграционных тестов.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use coach_reservations::{
    app,
    config::{AppConfig, CoachConfig, Config},
    AppState,
};

pub fn test_config(coach: CoachConfig) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "coach_reservations=debug".to_string(),
        },
        coach,
    }
}

pub fn test_state(coach: CoachConfig) -> Arc<AppState> {
    AppState::new(test_config(coach))
}

/// Вагон без предварительной брони.
pub fn empty_coach() -> CoachConfig {
    CoachConfig { prebook_modulus: 0, ..CoachConfig::default() }
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn router(state: Arc<AppState>) -> Router {
    app(state)
}
