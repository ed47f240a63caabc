pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod controllers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Shared state для всего приложения
pub struct AppState {
    pub coach: services::ReservationService,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let coach = services::ReservationService::from_config(&config.coach);
        Arc::new(Self { coach, config })
    }
}

/// Главный роутер: API смонтирован под `/api`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Coach reservations API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
