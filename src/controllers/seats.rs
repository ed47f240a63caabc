use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(get_seats))
        .route("/seats/summary", get(get_summary))
}

// GET /api/seats
async fn get_seats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.coach.list()))
}

// GET /api/seats/summary
async fn get_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.coach.summary()))
}
