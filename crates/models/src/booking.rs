use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    /// Bookings reference services by display name, not by id.
    pub service_name: String,
    pub staff_name: String,
    /// ISO date, `YYYY-MM-DD`.
    pub booking_date: String,
    pub booking_time: String,
    pub status: String,
    pub price: f64,
    /// Minutes.
    pub duration: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_CONFIRMED: &str = "Confirmed";
pub const STATUS_CANCELED: &str = "Canceled";
pub const STATUSES: &[&str] = &[STATUS_PENDING, STATUS_CONFIRMED, STATUS_CANCELED];

pub fn validate_status(s: &str) -> Result<(), ModelError> {
    if !STATUSES.contains(&s) {
        return Err(ModelError::Validation(format!("invalid booking status: {s}")));
    }
    Ok(())
}

pub fn validate_date(d: &str) -> Result<(), ModelError> {
    let ok = d.len() == 10
        && d.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !ok {
        return Err(ModelError::Validation(format!("invalid booking date: {d}")));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dto {
    #[serde(default)]
    pub id: i32,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    #[serde(rename = "service")]
    pub service_name: String,
    #[serde(rename = "staff")]
    pub staff_name: String,
    #[serde(rename = "date")]
    pub booking_date: String,
    #[serde(rename = "time")]
    pub booking_time: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub price: f64,
    pub duration: i32,
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

impl From<Model> for Dto {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            client_name: m.client_name,
            client_email: m.client_email,
            client_phone: m.client_phone,
            service_name: m.service_name,
            staff_name: m.staff_name,
            booking_date: m.booking_date,
            booking_time: m.booking_time,
            status: m.status,
            price: m.price,
            duration: m.duration,
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
            client_name: Set(self.client_name),
            client_email: Set(self.client_email),
            client_phone: Set(self.client_phone),
            service_name: Set(self.service_name),
            staff_name: Set(self.staff_name),
            booking_date: Set(self.booking_date),
            booking_time: Set(self.booking_time),
            status: Set(self.status),
            price: Set(self.price),
            duration: Set(self.duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_enumeration_is_closed() {
        assert!(validate_status("Pending").is_ok());
        assert!(validate_status("Confirmed").is_ok());
        assert!(validate_status("Canceled").is_ok());
        assert!(validate_status("Done").is_err());
        assert!(validate_status("pending").is_err());
    }

    #[test]
    fn date_must_be_iso() {
        assert!(validate_date("2023-11-21").is_ok());
        assert!(validate_date("Nov 21, 2023").is_err());
        assert!(validate_date("2023-1-21").is_err());
    }

    #[test]
    fn wire_renames() {
        let json = serde_json::json!({
            "clientName": "Olivia Martinez",
            "clientEmail": "olivia.m@example.com",
            "clientPhone": "555-5678",
            "service": "Balayage",
            "staff": "Alex",
            "date": "2023-11-21",
            "time": "12:00 PM",
            "price": 150.0,
            "duration": 90
        });
        let dto: Dto = serde_json::from_value(json).unwrap();
        assert_eq!(dto.service_name, "Balayage");
        assert_eq!(dto.booking_date, "2023-11-21");
        // status defaults to Pending when the client omits it
        assert_eq!(dto.status, STATUS_PENDING);
    }
}
