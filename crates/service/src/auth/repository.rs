use async_trait::async_trait;

use super::{domain::NewUser, errors::AuthError};
use models::user::Model as User;

/// Persistence seam for the auth flows. The production implementation is
/// [`super::seaorm::SeaOrmAuthRepository`]; unit tests use [`mock`].
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AuthError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
    async fn email_or_username_taken(&self, email: &str, username: &str)
        -> Result<bool, AuthError>;
    async fn create_user(&self, user: NewUser) -> Result<User, AuthError>;
    async fn set_reset_token(&self, user_id: i32, token: &str, expires: i64)
        -> Result<(), AuthError>;
    /// Returns the user only while the token is still valid at `now_ms`.
    async fn find_by_reset_token(&self, token: &str, now_ms: i64)
        -> Result<Option<User>, AuthError>;
    /// Stores the new hash and clears any outstanding reset token.
    async fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), AuthError>;
}

pub mod mock {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    /// In-memory user table for unit tests.
    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<Vec<User>>,
        next_id: Mutex<i32>,
    }

    impl MockAuthRepository {
        pub fn new() -> Self {
            Self { users: Mutex::new(Vec::new()), next_id: Mutex::new(1) }
        }

        pub fn user(&self, id: i32) -> Option<User> {
            self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AuthError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == identifier || u.email == identifier)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        }

        async fn email_or_username_taken(
            &self,
            email: &str,
            username: &str,
        ) -> Result<bool, AuthError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.email == email || u.username == username))
        }

        async fn create_user(&self, user: NewUser) -> Result<User, AuthError> {
            let mut next_id = self.next_id.lock().unwrap();
            let created = User {
                id: *next_id,
                name: user.name,
                email: user.email,
                username: user.username,
                password_hash: user.password_hash,
                role: user.role,
                avatar_url: user.avatar_url,
                reset_password_token: None,
                reset_password_expires: None,
                created_at: Utc::now(),
            };
            *next_id += 1;
            self.users.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn set_reset_token(
            &self,
            user_id: i32,
            token: &str,
            expires: i64,
        ) -> Result<(), AuthError> {
            let mut users = self.users.lock().unwrap();
            if let Some(u) = users.iter_mut().find(|u| u.id == user_id) {
                u.reset_password_token = Some(token.to_string());
                u.reset_password_expires = Some(expires);
            }
            Ok(())
        }

        async fn find_by_reset_token(
            &self,
            token: &str,
            now_ms: i64,
        ) -> Result<Option<User>, AuthError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| {
                    u.reset_password_token.as_deref() == Some(token)
                        && u.reset_password_expires.is_some_and(|exp| exp > now_ms)
                })
                .cloned())
        }

        async fn update_password(
            &self,
            user_id: i32,
            password_hash: &str,
        ) -> Result<(), AuthError> {
            let mut users = self.users.lock().unwrap();
            if let Some(u) = users.iter_mut().find(|u| u.id == user_id) {
                u.password_hash = password_hash.to_string();
                u.reset_password_token = None;
                u.reset_password_expires = None;
            }
            Ok(())
        }
    }
}
