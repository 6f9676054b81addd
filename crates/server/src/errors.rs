use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use models::errors::ModelError;
use service::{auth::AuthError, ServiceError};

/// Every handler error becomes a `{ "message": ... }` body. 4xx messages
/// are user-correctable; 5xx are logged and the body stays generic.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Internal(m) => {
                error!(error = %m, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ApiError::BadRequest(m),
            ModelError::Db(m) => ApiError::Internal(m),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => ApiError::BadRequest(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Db(m) => ApiError::Internal(m),
            ServiceError::Model(m) => m.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ApiError::BadRequest(m),
            AuthError::Conflict => ApiError::BadRequest("User already exists".into()),
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".into()),
            AuthError::EmailNotFound => {
                ApiError::NotFound("User with that email does not exist".into())
            }
            AuthError::ResetTokenInvalid => {
                ApiError::BadRequest("Password reset token is invalid or has expired".into())
            }
            AuthError::Token(_) => ApiError::Unauthorized("Not authorized, token failed".into()),
            AuthError::Hash(m) | AuthError::Mail(m) | AuthError::Db(m) => ApiError::Internal(m),
        }
    }
}
