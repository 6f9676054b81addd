use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Enrollments reference courses by title.
    pub course_title: String,
    pub submitted_date: String,
    pub status: String,
    pub avatar_url: String,
    pub alt_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_APPROVED: &str = "Approved";
pub const STATUS_DECLINED: &str = "Declined";
pub const STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_DECLINED];

pub fn validate_status(s: &str) -> Result<(), ModelError> {
    if !STATUSES.contains(&s) {
        return Err(ModelError::Validation(format!("invalid enrollment status: {s}")));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dto {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "course")]
    pub course_title: String,
    #[serde(rename = "submitted")]
    pub submitted_date: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub avatar_url: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

impl From<Model> for Dto {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            course_title: m.course_title,
            submitted_date: m.submitted_date,
            status: m.status,
            avatar_url: m.avatar_url,
            alt_text: m.alt_text,
        }
    }
}

impl Dto {
    pub fn active_model(self) -> ActiveModel {
        let mut am = self.active_model_keep_id();
        am.id = NotSet;
        am
    }

    pub fn active_model_keep_id(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            email: Set(self.email),
            phone: Set(self.phone),
            course_title: Set(self.course_title),
            submitted_date: Set(self.submitted_date),
            status: Set(self.status),
            avatar_url: Set(self.avatar_url),
            alt_text: Set(self.alt_text),
        }
    }
}
