use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{errors::ApiError, extract::AdminAuth, state::AppState};
use models::settings::{self, Dto, SETTINGS_ROW_ID};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

/// Public: the SPA needs salon name, logo and maintenance flag before login.
#[utoipa::path(get, path = "/api/settings", tag = "settings",
    responses((status = 200, description = "Site settings singleton")))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // The row is seeded by the migrations; an empty object covers a wiped table.
    let row = settings::Entity::find_by_id(SETTINGS_ROW_ID).one(&state.db).await?;
    match row {
        Some(m) => Ok(Json(serde_json::to_value(Dto::from(m)).map_err(
            |e| ApiError::Internal(e.to_string()),
        )?)),
        None => Ok(Json(serde_json::json!({}))),
    }
}

#[utoipa::path(put, path = "/api/settings", tag = "settings",
    responses((status = 200, description = "Settings updated"),
              (status = 403, description = "Admin only")))]
pub async fn update_settings(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(dto): Json<Dto>,
) -> Result<Json<serde_json::Value>, ApiError> {
    settings::Entity::update_many()
        .set(dto.update_model())
        .filter(settings::Column::Id.eq(SETTINGS_ROW_ID))
        .exec(&state.db)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Settings updated" })))
}
