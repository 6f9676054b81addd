use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::{errors::ApiError, extract::AdminAuth, state::AppState};
use service::sync::{self, SyncSnapshot};

pub fn router() -> Router<AppState> {
    Router::new().route("/push", post(push)).route("/pull", get(pull))
}

#[utoipa::path(post, path = "/api/sync/push", tag = "sync",
    responses((status = 200, description = "All collections in the snapshot replaced"),
              (status = 403, description = "Admin only"),
              (status = 500, description = "Rolled back, nothing changed")))]
pub async fn push(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(snapshot): Json<SyncSnapshot>,
) -> Result<Json<serde_json::Value>, ApiError> {
    sync::push(&state.db, snapshot).await?;
    Ok(Json(serde_json::json!({ "status": "success", "message": "Sync complete" })))
}

#[utoipa::path(get, path = "/api/sync/pull", tag = "sync",
    responses((status = 200, description = "Complete server state, users excluded"),
              (status = 403, description = "Admin only")))]
pub async fn pull(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = sync::pull(&state.db).await?;
    Ok(Json(serde_json::json!({ "status": "success", "data": data })))
}
