use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;

use crate::{errors::ApiError, extract::AdminAuth, state::AppState};
use models::booking::{self, Dto, STATUS_PENDING};
use service::mailer::spawn_notify;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list).post(create)).route("/:id", put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/bookings", tag = "bookings",
    responses((status = 200, description = "All bookings, newest date first")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Dto>>, ApiError> {
    let rows = booking::Entity::find()
        .order_by_desc(booking::Column::BookingDate)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Public: anyone can book. Status is forced to Pending no matter what the
/// body says, and the salon is notified by mail without delaying the
/// response.
#[utoipa::path(post, path = "/api/bookings", tag = "bookings",
    responses((status = 201, description = "Booking recorded as Pending"),
              (status = 400, description = "Invalid booking date")))]
pub async fn create(
    State(state): State<AppState>,
    Json(mut dto): Json<Dto>,
) -> Result<(StatusCode, Json<Dto>), ApiError> {
    booking::validate_date(&dto.booking_date)?;
    dto.status = STATUS_PENDING.to_string();
    let created = dto.active_model().insert(&state.db).await?;

    if !state.notify_to.is_empty() {
        spawn_notify(
            state.mailer.clone(),
            state.notify_to.clone(),
            "New Booking Received".into(),
            format!(
                "New booking: {} ({}) booked {} on {} at {}.",
                created.client_name,
                created.client_email,
                created.service_name,
                created.booking_date,
                created.booking_time
            ),
        );
    }
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[derive(Deserialize)]
pub struct UpdateBooking {
    pub status: String,
    #[serde(default)]
    pub staff: Option<String>,
}

/// Admin moves a booking through its lifecycle and can assign staff.
pub async fn update(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateBooking>,
) -> Result<Json<serde_json::Value>, ApiError> {
    booking::validate_status(&input.status)?;
    let mut update = booking::Entity::update_many()
        .col_expr(booking::Column::Status, Expr::value(input.status));
    if let Some(staff) = input.staff {
        update = update.col_expr(booking::Column::StaffName, Expr::value(staff));
    }
    let result = update.filter(booking::Column::Id.eq(id)).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Booking {id} not found")));
    }
    Ok(Json(serde_json::json!({ "message": "Booking updated" })))
}

pub async fn remove(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    booking::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "Booking deleted" })))
}
