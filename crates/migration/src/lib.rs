//! Migrator registering table migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_services;
mod m20240101_000003_create_products;
mod m20240101_000004_create_courses;
mod m20240101_000005_create_bookings;
mod m20240101_000006_create_enrollments;
mod m20240101_000007_create_gallery;
mod m20240101_000008_create_orders;
mod m20240101_000009_create_settings;
mod m20240101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_services::Migration),
            Box::new(m20240101_000003_create_products::Migration),
            Box::new(m20240101_000004_create_courses::Migration),
            Box::new(m20240101_000005_create_bookings::Migration),
            Box::new(m20240101_000006_create_enrollments::Migration),
            Box::new(m20240101_000007_create_gallery::Migration),
            Box::new(m20240101_000008_create_orders::Migration),
            Box::new(m20240101_000009_create_settings::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000010_add_indexes::Migration),
        ]
    }
}
