use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category: String,
    pub name: String,
    pub description: String,
    /// Minutes.
    pub duration: i32,
    pub price: f64,
    pub image_url: String,
    pub alt_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Wire representation of a salon service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dto {
    #[serde(default)]
    pub id: i32,
    pub category: String,
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub price: f64,
    pub image_url: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
}

impl From<Model> for Dto {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            category: m.category,
            name: m.name,
            description: m.description,
            duration: m.duration,
            price: m.price,
            image_url: m.image_url,
            alt_text: m.alt_text,
        }
    }
}

impl Dto {
    /// Active model for a fresh insert; the database assigns the id.
    pub fn active_model(self) -> ActiveModel {
        let mut am = self.active_model_keep_id();
        am.id = NotSet;
        am
    }

    /// Active model that preserves the client-side id (sync push).
    pub fn active_model_keep_id(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            category: Set(self.category),
            name: Set(self.name),
            description: Set(self.description),
            duration: Set(self.duration),
            price: Set(self.price),
            image_url: Set(self.image_url),
            alt_text: Set(self.alt_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let dto = Dto {
            id: 7,
            category: "Hair".into(),
            name: "Balayage".into(),
            description: "Freehand color".into(),
            duration: 90,
            price: 150.0,
            image_url: "/uploads/balayage.jpg".into(),
            alt_text: "Balayage result".into(),
        };
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json["imageUrl"], "/uploads/balayage.jpg");
        assert_eq!(json["alt"], "Balayage result");
        assert!(json.get("image_url").is_none());
    }
}
