//! Create `bookings` table.
//!
//! Bookings carry the service display name rather than a foreign key; the
//! admin UI edits them independently of the services catalogue.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(pk_auto(Bookings::Id))
                    .col(string_len(Bookings::ClientName, 255).not_null())
                    .col(string_len(Bookings::ClientEmail, 255).not_null())
                    .col(string_len(Bookings::ClientPhone, 64).not_null())
                    .col(string_len(Bookings::ServiceName, 255).not_null())
                    .col(string_len(Bookings::StaffName, 255).not_null())
                    .col(string_len(Bookings::BookingDate, 10).not_null())
                    .col(string_len(Bookings::BookingTime, 32).not_null())
                    .col(string_len(Bookings::Status, 32).not_null())
                    .col(double(Bookings::Price).not_null())
                    .col(integer(Bookings::Duration).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bookings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    ClientName,
    ClientEmail,
    ClientPhone,
    ServiceName,
    StaffName,
    BookingDate,
    BookingTime,
    Status,
    Price,
    Duration,
}
