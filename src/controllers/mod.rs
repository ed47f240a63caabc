pub mod seats;
pub mod reservations;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(seats::routes())
        .merge(reservations::routes())
        .merge(reservations::reset_route())
}
