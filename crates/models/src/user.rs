use chrono::Utc;
use sea_orm::{entity::prelude::*, Condition, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub avatar_url: String,
    pub reset_password_token: Option<String>,
    /// Epoch milliseconds; tokens older than this are rejected.
    pub reset_password_expires: Option<i64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const ROLE_CLIENT: &str = "Client";
pub const ROLE_SUPER_ADMIN: &str = "Super Admin";

/// What the API exposes about a user. The password hash never leaves the
/// models layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub username: String,
    pub role: String,
    pub avatar_url: String,
}

impl From<Model> for PublicDto {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            username: m.username,
            role: m.role,
            avatar_url: m.avatar_url,
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// Look a user up by username or email, the login identifier rule.
pub async fn find_by_identifier(
    db: &DatabaseConnection,
    identifier: &str,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(
            Condition::any()
                .add(Column::Username.eq(identifier))
                .add(Column::Email.eq(identifier)),
        )
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    username: &str,
    password_hash: &str,
    role: &str,
    avatar_url: &str,
) -> Result<Model, ModelError> {
    validate_email(email)?;
    validate_name(name)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(role.to_string()),
        avatar_url: Set(avatar_url.to_string()),
        reset_password_token: Set(None),
        reset_password_expires: Set(None),
        created_at: Set(Utc::now()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_dto_has_no_hash() {
        let m = Model {
            id: 1,
            name: "Alice".into(),
            email: "alice@x.com".into(),
            username: "alice".into(),
            password_hash: "secret-hash".into(),
            role: ROLE_CLIENT.into(),
            avatar_url: "https://example.com/a.png".into(),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(PublicDto::from(m)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["avatarUrl"], "https://example.com/a.png");
    }

    #[test]
    fn email_must_contain_at() {
        assert!(validate_email("nope").is_err());
        assert!(validate_email("a@b.c").is_ok());
    }
}
