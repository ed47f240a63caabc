use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{error::ReservationError, models::Priority, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reserve", post(reserve_seats))
        .route("/reservations", get(get_reservations))
}

pub fn reset_route() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reset", post(reset_seats))
}

/* ---------- RESERVE ---------- */

// POST /api/reserve
#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    // клиент присылает null, если в поле не число
    #[serde(default)]
    pub num_seats: Option<i64>,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Serialize)]
pub struct ReserveResponse {
    pub reserved_seats: Vec<u32>,
}

async fn reserve_seats(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReserveRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ReservationError> {
    let Json(req) = payload.map_err(|rejection| ReservationError::MalformedRequest {
        reason: rejection.body_text(),
    })?;

    // пустые и отрицательные значения тоже ошибка диапазона, а не ошибка разбора
    let count = req
        .num_seats
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);

    let reserved_seats = state.coach.reserve(count, req.priority)?;
    Ok((StatusCode::OK, Json(ReserveResponse { reserved_seats })))
}

// GET /api/reservations
async fn get_reservations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.coach.reservations()))
}

/* ---------- RESET ---------- */

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: String,
    pub prebooked: Vec<u32>,
}

// POST /api/reset
async fn reset_seats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::warn!("RESET: resetting coach to baseline");
    let prebooked = state.coach.reset();

    (
        StatusCode::OK,
        Json(ResetResponse { message: "seats reset".to_string(), prebooked }),
    )
}
