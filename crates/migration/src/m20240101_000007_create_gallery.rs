//! Create `gallery` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gallery::Table)
                    .if_not_exists()
                    .col(pk_auto(Gallery::Id))
                    .col(string_len(Gallery::Category, 128).not_null())
                    .col(string_len(Gallery::Caption, 255).not_null())
                    .col(string_len(Gallery::ImageUrl, 512).not_null())
                    .col(string_len(Gallery::AltText, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Gallery::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Gallery {
    Table,
    Id,
    Category,
    Caption,
    ImageUrl,
    AltText,
}
