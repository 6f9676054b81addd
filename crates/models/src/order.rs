use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Client-assigned order number, e.g. `#G&G-0879`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub client_name: String,
    pub order_date: String,
    pub status: String,
    pub total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_SHIPPED: &str = "Shipped";
pub const STATUS_DELIVERED: &str = "Delivered";
pub const STATUS_CANCELED: &str = "Canceled";
pub const STATUSES: &[&str] = &[STATUS_PENDING, STATUS_SHIPPED, STATUS_DELIVERED, STATUS_CANCELED];

pub fn validate_status(s: &str) -> Result<(), ModelError> {
    if !STATUSES.contains(&s) {
        return Err(ModelError::Validation(format!("invalid order status: {s}")));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dto {
    pub id: String,
    pub client_name: String,
    #[serde(rename = "date")]
    pub order_date: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub total: f64,
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

impl From<Model> for Dto {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            client_name: m.client_name,
            order_date: m.order_date,
            status: m.status,
            total: m.total,
        }
    }
}

impl Dto {
    /// Orders always keep their client-assigned id.
    pub fn active_model(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            client_name: Set(self.client_name),
            order_date: Set(self.order_date),
            status: Set(self.status),
            total: Set(self.total),
        }
    }
}
