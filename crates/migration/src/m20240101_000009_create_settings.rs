//! Create `settings` table and seed the singleton row (id = 1) so updates
//! always have a target.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(integer(Settings::Id).primary_key())
                    .col(string_len(Settings::SalonName, 255).not_null())
                    .col(string_len(Settings::LogoUrl, 512).not_null())
                    .col(string_len(Settings::FaviconUrl, 512).not_null())
                    .col(boolean(Settings::MaintenanceMode).not_null())
                    .col(string_len(Settings::PrimaryPhone, 64).not_null())
                    .col(string_len(Settings::BookingEmail, 255).not_null())
                    .col(string_len(Settings::Address, 512).not_null())
                    .col(string_len(Settings::SocialInstagram, 512).not_null())
                    .col(string_len(Settings::SocialTwitter, 512).not_null())
                    .col(string_len(Settings::SocialFacebook, 512).not_null())
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(Settings::Table)
            .columns([
                Settings::Id,
                Settings::SalonName,
                Settings::LogoUrl,
                Settings::FaviconUrl,
                Settings::MaintenanceMode,
                Settings::PrimaryPhone,
                Settings::BookingEmail,
                Settings::Address,
                Settings::SocialInstagram,
                Settings::SocialTwitter,
                Settings::SocialFacebook,
            ])
            .values_panic([
                1.into(),
                "".into(),
                "".into(),
                "".into(),
                false.into(),
                "".into(),
                "".into(),
                "".into(),
                "".into(),
                "".into(),
                "".into(),
            ])
            .to_owned();
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Settings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Id,
    SalonName,
    LogoUrl,
    FaviconUrl,
    MaintenanceMode,
    PrimaryPhone,
    BookingEmail,
    Address,
    SocialInstagram,
    SocialTwitter,
    SocialFacebook,
}
