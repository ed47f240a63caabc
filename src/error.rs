//! Ошибки бронирования и их отображение в HTTP-ответы.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// Запрошено мест вне диапазона [1, 7].
    #[error("num_seats must be between 1 and 7")]
    Capacity { requested: usize },

    /// Свободных мест меньше, чем запрошено.
    #[error("not enough seats available")]
    InsufficientSeats { requested: usize, available: usize },

    /// Тело запроса не разобрано: не JSON, неизвестный priority и т.п.
    #[error("invalid request body: {reason}")]
    MalformedRequest { reason: String },

    /// Номер вне диапазона или место уже занято. Нарушение инварианта блокировки.
    #[error("seat {seat} is out of range or already reserved")]
    InvalidSeat { seat: u32 },

    /// Попытка списать из квоты больше, чем в ней осталось.
    #[error("priority quota exceeded: requested {requested}, remaining {remaining}")]
    QuotaExceeded { requested: usize, remaining: usize },
}

impl ReservationError {
    /// Ошибки клиента возвращаются как есть, остальное - внутренние сбои.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Capacity { .. } | Self::InsufficientSeats { .. } | Self::MalformedRequest { .. }
        )
    }
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::warn!("reservation rejected: {}", self);
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response();
        }

        tracing::error!(error = %self, "reservation invariant violated");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal error" })),
        )
            .into_response()
    }
}
