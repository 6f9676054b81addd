use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;

use crate::{
    errors::ApiError,
    extract::{AdminAuth, Auth},
    state::AppState,
};
use models::order::{self, Dto, STATUS_PENDING};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create)).route("/:id", put(update))
}

/// Any signed-in user can list orders; clients see them in their history.
#[utoipa::path(get, path = "/api/orders", tag = "orders",
    responses((status = 200, description = "All orders, newest date first"),
              (status = 401, description = "Missing or invalid token")))]
pub async fn list(_auth: Auth, State(state): State<AppState>) -> Result<Json<Vec<Dto>>, ApiError> {
    let rows =
        order::Entity::find().order_by_desc(order::Column::OrderDate).all(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Public checkout. The client assigns the order number; a collision is a
/// database error and surfaces as a 500.
#[utoipa::path(post, path = "/api/orders", tag = "orders",
    responses((status = 201, description = "Order recorded as Pending"),
              (status = 400, description = "Missing order id")))]
pub async fn create(
    State(state): State<AppState>,
    Json(mut dto): Json<Dto>,
) -> Result<(StatusCode, Json<Dto>), ApiError> {
    if dto.id.trim().is_empty() {
        return Err(ApiError::BadRequest("Order id is required".into()));
    }
    dto.status = STATUS_PENDING.to_string();
    let created = dto.active_model().insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[derive(Deserialize)]
pub struct UpdateOrder {
    pub status: String,
}

pub async fn update(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateOrder>,
) -> Result<Json<serde_json::Value>, ApiError> {
    order::validate_status(&input.status)?;
    let result = order::Entity::update_many()
        .col_expr(order::Column::Status, Expr::value(input.status))
        .filter(order::Column::Id.eq(id.clone()))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Order {id} not found")));
    }
    Ok(Json(serde_json::json!({ "message": "Order updated" })))
}
