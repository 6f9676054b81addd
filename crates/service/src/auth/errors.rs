use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("user already exists")]
    Conflict,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no account with that email address exists")]
    EmailNotFound,

    #[error("password reset token is invalid or has expired")]
    ResetTokenInvalid,

    #[error("hash error: {0}")]
    Hash(String),

    #[error("token error: {0}")]
    Token(String),

    #[error("mail error: {0}")]
    Mail(String),

    #[error("database error: {0}")]
    Db(String),
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
            models::errors::ModelError::Db(msg) => AuthError::Db(msg),
        }
    }
}
