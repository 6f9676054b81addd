//! Create `users` table.
//!
//! Username and email are both login identifiers, so both are unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Name, 128).not_null())
                    .col(string_len(Users::Email, 255).unique_key().not_null())
                    .col(string_len(Users::Username, 128).unique_key().not_null())
                    .col(string_len(Users::PasswordHash, 255).not_null())
                    .col(string_len(Users::Role, 32).not_null())
                    .col(string_len(Users::AvatarUrl, 512).not_null())
                    // Explicitly nullable: only set while a reset is pending
                    .col(ColumnDef::new(Users::ResetPasswordToken).string_len(64).null())
                    .col(ColumnDef::new(Users::ResetPasswordExpires).big_integer().null())
                    .col(timestamp(Users::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Username,
    PasswordHash,
    Role,
    AvatarUrl,
    ResetPasswordToken,
    ResetPasswordExpires,
    CreatedAt,
}
