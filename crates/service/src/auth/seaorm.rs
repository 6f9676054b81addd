use async_trait::async_trait;
use sea_orm::{entity::prelude::*, Condition, DatabaseConnection, Set};

use super::{domain::NewUser, errors::AuthError, repository::AuthRepository};
use models::user::{self, Column, Entity, Model as User};

/// [`AuthRepository`] backed by the live database connection.
#[derive(Clone)]
pub struct SeaOrmAuthRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: DbErr) -> AuthError {
    AuthError::Db(e.to_string())
}

#[async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AuthError> {
        Ok(user::find_by_identifier(&self.db, identifier).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(user::find_by_email(&self.db, email).await?)
    }

    async fn email_or_username_taken(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, AuthError> {
        let existing = Entity::find()
            .filter(
                Condition::any().add(Column::Email.eq(email)).add(Column::Username.eq(username)),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(existing.is_some())
    }

    async fn create_user(&self, new: NewUser) -> Result<User, AuthError> {
        Ok(user::create(
            &self.db,
            &new.name,
            &new.email,
            &new.username,
            &new.password_hash,
            &new.role,
            &new.avatar_url,
        )
        .await?)
    }

    async fn set_reset_token(
        &self,
        user_id: i32,
        token: &str,
        expires: i64,
    ) -> Result<(), AuthError> {
        Entity::update_many()
            .col_expr(Column::ResetPasswordToken, Expr::value(Some(token.to_string())))
            .col_expr(Column::ResetPasswordExpires, Expr::value(Some(expires)))
            .filter(Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
        now_ms: i64,
    ) -> Result<Option<User>, AuthError> {
        Entity::find()
            .filter(Column::ResetPasswordToken.eq(token))
            .filter(Column::ResetPasswordExpires.gt(now_ms))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), AuthError> {
        let Some(found) =
            Entity::find_by_id(user_id).one(&self.db).await.map_err(db_err)?
        else {
            return Ok(());
        };
        let mut am: user::ActiveModel = found.into();
        am.password_hash = Set(password_hash.to_string());
        am.reset_password_token = Set(None);
        am.reset_password_expires = Set(None);
        am.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
