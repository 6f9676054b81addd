use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::state::AppState;
use common::types::Health;

#[utoipa::path(get, path = "/api/health", tag = "health",
    responses((status = 200, description = "API and database reachable"),
              (status = 503, description = "Database unreachable")))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let uptime = state.started_at.elapsed().as_secs_f64();
    let timestamp = Utc::now().to_rfc3339();
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Health {
                status: "healthy".into(),
                timestamp,
                uptime,
                database: "connected".into(),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Health {
                status: "unhealthy".into(),
                timestamp,
                uptime,
                database: "disconnected".into(),
                error: Some(e.to_string()),
            }),
        ),
    }
}
