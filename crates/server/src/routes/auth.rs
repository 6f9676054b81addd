use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::{errors::ApiError, state::AppState};
use service::auth::{AuthService, AuthSession, LoginInput, RegisterInput, SeaOrmAuthRepository};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", put(reset_password))
}

fn auth_service(state: &AppState) -> AuthService<SeaOrmAuthRepository> {
    AuthService::new(
        SeaOrmAuthRepository::new(state.db.clone()),
        state.jwt_secret.clone(),
        state.frontend_url.clone(),
    )
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Token and public user"),
              (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = auth_service(&state).login(input).await?;
    Ok(Json(session))
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered"),
              (status = 400, description = "Invalid input or duplicate account")))]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let user_id = auth_service(&state).register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully",
            "userId": user_id,
        })),
    ))
}

#[derive(Deserialize)]
pub struct ForgotPasswordInput {
    pub email: String,
}

#[utoipa::path(post, path = "/api/auth/forgot-password", tag = "auth",
    responses((status = 200, description = "Reset email sent"),
              (status = 404, description = "No account for that email")))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth_service(&state).forgot_password(&input.email, state.mailer.as_ref()).await?;
    Ok(Json(serde_json::json!({ "message": "Password reset email sent" })))
}

#[derive(Deserialize)]
pub struct ResetPasswordInput {
    pub password: String,
}

#[utoipa::path(put, path = "/api/auth/reset-password/{token}", tag = "auth",
    responses((status = 200, description = "Password replaced"),
              (status = 400, description = "Token invalid or expired")))]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(input): Json<ResetPasswordInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth_service(&state).reset_password(&token, &input.password).await?;
    Ok(Json(serde_json::json!({ "message": "Password has been reset" })))
}
