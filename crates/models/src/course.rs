use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Free text, e.g. "6 weeks".
    pub duration: String,
    pub price: f64,
    pub prerequisites: String,
    pub image_url: String,
    pub alt_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dto {
    #[serde(default)]
    pub id: i32,
    pub category: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub price: f64,
    pub prerequisites: String,
    pub image_url: String,
    #[serde(rename = "alt")]
    pub alt_text: String,
}

impl From<Model> for Dto {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            category: m.category,
            title: m.title,
            description: m.description,
            duration: m.duration,
            price: m.price,
            prerequisites: m.prerequisites,
            image_url: m.image_url,
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
            category: Set(self.category),
            title: Set(self.title),
            description: Set(self.description),
            duration: Set(self.duration),
            price: Set(self.price),
            prerequisites: Set(self.prerequisites),
            image_url: Set(self.image_url),
            alt_text: Set(self.alt_text),
        }
    }
}
