//! Create `products` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string_len(Products::Category, 128).not_null())
                    .col(string_len(Products::Name, 255).not_null())
                    .col(text(Products::Description).not_null())
                    .col(double(Products::Price).not_null())
                    .col(integer(Products::Stock).not_null())
                    .col(string_len(Products::ImageUrl, 512).not_null())
                    .col(string_len(Products::AltText, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Category,
    Name,
    Description,
    Price,
    Stock,
    ImageUrl,
    AltText,
}
