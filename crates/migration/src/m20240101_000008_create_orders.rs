//! Create `orders` table. The primary key is the client-assigned order
//! number string, not an auto-increment.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(string_len(Orders::Id, 64).primary_key())
                    .col(string_len(Orders::ClientName, 255).not_null())
                    .col(string_len(Orders::OrderDate, 64).not_null())
                    .col(string_len(Orders::Status, 32).not_null())
                    .col(double(Orders::Total).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    ClientName,
    OrderDate,
    Status,
    Total,
}
