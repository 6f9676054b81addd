//! Create `services` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(pk_auto(Services::Id))
                    .col(string_len(Services::Category, 128).not_null())
                    .col(string_len(Services::Name, 255).not_null())
                    .col(text(Services::Description).not_null())
                    .col(integer(Services::Duration).not_null())
                    .col(double(Services::Price).not_null())
                    .col(string_len(Services::ImageUrl, 512).not_null())
                    .col(string_len(Services::AltText, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Services::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Category,
    Name,
    Description,
    Duration,
    Price,
    ImageUrl,
    AltText,
}
