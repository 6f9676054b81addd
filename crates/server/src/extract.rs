use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{errors::ApiError, state::AppState};
use models::user::ROLE_SUPER_ADMIN;
use service::auth::{decode_claims, Claims};

/// Any valid bearer token.
pub struct Auth(pub Claims);

/// A valid bearer token carrying the Super Admin role.
pub struct AdminAuth(pub Claims);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Not authorized, no token".into()))
}

#[async_trait]
impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(parts)?;
        let claims = decode_claims(token, &state.jwt_secret)
            .map_err(|_| ApiError::Unauthorized("Not authorized, token failed".into()))?;
        Ok(Auth(claims))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let Auth(claims) = Auth::from_request_parts(parts, state).await?;
        if claims.role != ROLE_SUPER_ADMIN {
            return Err(ApiError::Forbidden("Not authorized as an admin".into()));
        }
        Ok(AdminAuth(claims))
    }
}
