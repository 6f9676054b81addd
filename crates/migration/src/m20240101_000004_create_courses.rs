//! Create `courses` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(pk_auto(Courses::Id))
                    .col(string_len(Courses::Category, 128).not_null())
                    .col(string_len(Courses::Title, 255).not_null())
                    .col(text(Courses::Description).not_null())
                    .col(string_len(Courses::Duration, 128).not_null())
                    .col(double(Courses::Price).not_null())
                    .col(text(Courses::Prerequisites).not_null())
                    .col(string_len(Courses::ImageUrl, 512).not_null())
                    .col(string_len(Courses::AltText, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Courses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Category,
    Title,
    Description,
    Duration,
    Price,
    Prerequisites,
    ImageUrl,
    AltText,
}
