use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;

use crate::{errors::ApiError, extract::AdminAuth, state::AppState};
use models::enrollment::{self, Dto, STATUS_PENDING};
use service::mailer::spawn_notify;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create)).route("/:id", put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/enrollments", tag = "enrollments",
    responses((status = 200, description = "All enrollments")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Dto>>, ApiError> {
    let rows = enrollment::Entity::find().all(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Public: course sign-ups arrive as Pending and the salon is notified.
#[utoipa::path(post, path = "/api/enrollments", tag = "enrollments",
    responses((status = 201, description = "Enrollment recorded as Pending")))]
pub async fn create(
    State(state): State<AppState>,
    Json(mut dto): Json<Dto>,
) -> Result<(StatusCode, Json<Dto>), ApiError> {
    dto.status = STATUS_PENDING.to_string();
    let created = dto.active_model().insert(&state.db).await?;

    if !state.notify_to.is_empty() {
        spawn_notify(
            state.mailer.clone(),
            state.notify_to.clone(),
            "New Enrollment Received".into(),
            format!(
                "New enrollment: {} ({}) enrolled in {}.",
                created.name, created.email, created.course_title
            ),
        );
    }
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[derive(Deserialize)]
pub struct UpdateEnrollment {
    pub status: String,
}

pub async fn update(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateEnrollment>,
) -> Result<Json<serde_json::Value>, ApiError> {
    enrollment::validate_status(&input.status)?;
    let result = enrollment::Entity::update_many()
        .col_expr(enrollment::Column::Status, Expr::value(input.status))
        .filter(enrollment::Column::Id.eq(id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Enrollment {id} not found")));
    }
    Ok(Json(serde_json::json!({ "message": "Enrollment updated" })))
}

pub async fn remove(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    enrollment::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Enrollment deleted" })))
}
