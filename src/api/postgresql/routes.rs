// PostgreSQL round-trip route definitions

use axum::{
    routing::get,
    Router,
};

use crate::config::state::AppState;
use super::handler;

/// Creates router with the database round-trip endpoint
pub fn postgresql_routes() -> Router<AppState> {
    Router::new()
        .route("/postgresql", get(handler::round_trip))
}
