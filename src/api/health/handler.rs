// Liveness endpoint

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: String,
}

/// Reports that the process is up; does not open a database connection
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    debug!("Health check called");

    Json(HealthStatus {
        status: "ok",
        environment: state.environment.environment.to_string(),
    })
}
