//! Create `enrollments` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(pk_auto(Enrollments::Id))
                    .col(string_len(Enrollments::Name, 255).not_null())
                    .col(string_len(Enrollments::Email, 255).not_null())
                    .col(string_len(Enrollments::Phone, 64).not_null())
                    .col(string_len(Enrollments::CourseTitle, 255).not_null())
                    .col(string_len(Enrollments::SubmittedDate, 64).not_null())
                    .col(string_len(Enrollments::Status, 32).not_null())
                    .col(string_len(Enrollments::AvatarUrl, 512).not_null())
                    .col(string_len(Enrollments::AltText, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Enrollments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    Name,
    Email,
    Phone,
    CourseTitle,
    SubmittedDate,
    Status,
    AvatarUrl,
    AltText,
}
