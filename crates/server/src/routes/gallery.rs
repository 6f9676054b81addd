use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};

use crate::{errors::ApiError, extract::AdminAuth, state::AppState};
use models::gallery::{self, Dto};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create)).route("/:id", put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/gallery", tag = "gallery",
    responses((status = 200, description = "All gallery items")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Dto>>, ApiError> {
    let rows = gallery::Entity::find().all(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(dto): Json<Dto>,
) -> Result<(StatusCode, Json<Dto>), ApiError> {
    let created = dto.active_model().insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<Dto>,
) -> Result<Json<Dto>, ApiError> {
    let result = gallery::Entity::update_many()
        .set(dto.clone().active_model())
        .filter(gallery::Column::Id.eq(id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Gallery item {id} not found")));
    }
    let mut out = dto;
    out.id = id;
    Ok(Json(out))
}

pub async fn remove(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    gallery::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Gallery item deleted" })))
}
