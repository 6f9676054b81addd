use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

/// Singleton row; id is always [`SETTINGS_ROW_ID`].
pub const SETTINGS_ROW_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub salon_name: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub maintenance_mode: bool,
    pub primary_phone: String,
    pub booking_email: String,
    pub address: String,
    pub social_instagram: String,
    pub social_twitter: String,
    pub social_facebook: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Socials {
    pub instagram: String,
    pub twitter: String,
    pub facebook: String,
}

/// Wire shape groups the three social links under `socials`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dto {
    pub salon_name: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub maintenance_mode: bool,
    pub primary_phone: String,
    pub booking_email: String,
    pub address: String,
    pub socials: Socials,
}

impl From<Model> for Dto {
    fn from(m: Model) -> Self {
        Self {
            salon_name: m.salon_name,
            logo_url: m.logo_url,
            favicon_url: m.favicon_url,
            maintenance_mode: m.maintenance_mode,
            primary_phone: m.primary_phone,
            booking_email: m.booking_email,
            address: m.address,
            socials: Socials {
                instagram: m.social_instagram,
                twitter: m.social_twitter,
                facebook: m.social_facebook,
            },
        }
    }
}

impl Dto {
    /// Column updates for the singleton row; the id itself is never touched.
    pub fn update_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            salon_name: Set(self.salon_name),
            logo_url: Set(self.logo_url),
            favicon_url: Set(self.favicon_url),
            maintenance_mode: Set(self.maintenance_mode),
            primary_phone: Set(self.primary_phone),
            booking_email: Set(self.booking_email),
            address: Set(self.address),
            social_instagram: Set(self.socials.instagram),
            social_twitter: Set(self.socials.twitter),
            social_facebook: Set(self.socials.facebook),
        }
    }
}
