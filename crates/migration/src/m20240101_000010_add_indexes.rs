//! Secondary indexes for the list endpoints that sort or filter.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Bookings are listed ordered by date
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_date")
                    .table(Bookings::Table)
                    .col(Bookings::BookingDate)
                    .to_owned(),
            )
            .await?;

        // Admin views group bookings and enrollments by status
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_status")
                    .table(Enrollments::Table)
                    .col(Enrollments::Status)
                    .to_owned(),
            )
            .await?;

        // Password reset lookup is by token
        manager
            .create_index(
                Index::create()
                    .name("idx_users_reset_token")
                    .table(Users::Table)
                    .col(Users::ResetPasswordToken)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_bookings_date").table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_status").table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_enrollments_status").table(Enrollments::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_users_reset_token").table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    BookingDate,
    Status,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Status,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    ResetPasswordToken,
}
