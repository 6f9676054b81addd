use serde::{Deserialize, Serialize};

use models::user::PublicDto;

/// Login accepts either the username or the email in one field.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginInput {
    pub identifier: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Returned by a successful login: a signed token plus the public view
/// of the account.
#[derive(Clone, Debug, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicDto,
}

/// JWT payload. `exp` is seconds since the epoch, one day out.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: String,
    pub exp: usize,
}

/// Fields persisted for a brand-new account.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub avatar_url: String,
}
