//! Bulk push/pull between the offline-first client and the database.
//!
//! Push replaces every collection present in the snapshot inside a single
//! transaction, keeping the client-assigned ids so references between
//! collections survive. Absent collections are left untouched. Users are
//! never part of a snapshot.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, Statement, TransactionTrait,
};
use sea_orm::ColumnTrait;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use models::{booking, course, enrollment, gallery, order, product, service, settings};

/// Tables the sync protocol refuses to carry.
pub const SYNC_EXCLUDED_TABLES: &[&str] = &["users"];

/// Wire shape of a push body and a pull response. Every field is optional
/// on push; pull fills them all.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SyncSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<service::Dto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<product::Dto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<course::Dto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<booking::Dto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollments: Option<Vec<enrollment::Dto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<gallery::Dto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<order::Dto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<settings::Dto>,
}

/// Replaces the server copy of every collection the snapshot carries.
/// All-or-nothing: any failure rolls the whole transaction back.
#[tracing::instrument(skip(db, snapshot))]
pub async fn push(db: &DatabaseConnection, snapshot: SyncSnapshot) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    relax_foreign_keys(&txn).await?;

    if let Some(rows) = snapshot.services {
        replace_all::<service::ActiveModel>(
            &txn,
            rows.into_iter().map(|d| d.active_model_keep_id()).collect(),
        )
        .await?;
    }
    if let Some(rows) = snapshot.products {
        replace_all::<product::ActiveModel>(
            &txn,
            rows.into_iter().map(|d| d.active_model_keep_id()).collect(),
        )
        .await?;
    }
    if let Some(rows) = snapshot.courses {
        replace_all::<course::ActiveModel>(
            &txn,
            rows.into_iter().map(|d| d.active_model_keep_id()).collect(),
        )
        .await?;
    }
    if let Some(rows) = snapshot.bookings {
        replace_all::<booking::ActiveModel>(
            &txn,
            rows.into_iter().map(|d| d.active_model_keep_id()).collect(),
        )
        .await?;
    }
    if let Some(rows) = snapshot.enrollments {
        replace_all::<enrollment::ActiveModel>(
            &txn,
            rows.into_iter().map(|d| d.active_model_keep_id()).collect(),
        )
        .await?;
    }
    if let Some(rows) = snapshot.gallery {
        replace_all::<gallery::ActiveModel>(
            &txn,
            rows.into_iter().map(|d| d.active_model_keep_id()).collect(),
        )
        .await?;
    }
    if let Some(rows) = snapshot.orders {
        replace_all::<order::ActiveModel>(
            &txn,
            rows.into_iter().map(|d| d.active_model()).collect(),
        )
        .await?;
    }
    if let Some(dto) = snapshot.settings {
        settings::Entity::update_many()
            .set(dto.update_model())
            .filter(settings::Column::Id.eq(settings::SETTINGS_ROW_ID))
            .exec(&txn)
            .await?;
    }

    restore_foreign_keys(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// The complete server state, users excluded.
#[tracing::instrument(skip(db))]
pub async fn pull(db: &DatabaseConnection) -> Result<SyncSnapshot, ServiceError> {
    let services = service::Entity::find().all(db).await?;
    let products = product::Entity::find().all(db).await?;
    let courses = course::Entity::find().all(db).await?;
    let bookings = booking::Entity::find().all(db).await?;
    let enrollments = enrollment::Entity::find().all(db).await?;
    let gallery = gallery::Entity::find().all(db).await?;
    let orders = order::Entity::find().all(db).await?;
    let settings = settings::Entity::find_by_id(settings::SETTINGS_ROW_ID).one(db).await?;

    Ok(SyncSnapshot {
        services: Some(services.into_iter().map(Into::into).collect()),
        products: Some(products.into_iter().map(Into::into).collect()),
        courses: Some(courses.into_iter().map(Into::into).collect()),
        bookings: Some(bookings.into_iter().map(Into::into).collect()),
        enrollments: Some(enrollments.into_iter().map(Into::into).collect()),
        gallery: Some(gallery.into_iter().map(Into::into).collect()),
        orders: Some(orders.into_iter().map(Into::into).collect()),
        settings: settings.map(Into::into),
    })
}

async fn replace_all<A>(txn: &DatabaseTransaction, rows: Vec<A>) -> Result<(), ServiceError>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    A::Entity::delete_many().exec(txn).await?;
    for row in rows {
        row.insert(txn).await?;
    }
    Ok(())
}

/// Rows arrive in arbitrary order, so key checks must wait until the
/// transaction is complete.
async fn relax_foreign_keys(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    match txn.get_database_backend() {
        DatabaseBackend::MySql => {
            txn.execute(Statement::from_string(
                DatabaseBackend::MySql,
                "SET FOREIGN_KEY_CHECKS = 0",
            ))
            .await?;
        }
        DatabaseBackend::Sqlite => {
            // Deferred checks apply until commit, nothing to restore.
            txn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "PRAGMA defer_foreign_keys = ON",
            ))
            .await?;
        }
        _ => {}
    }
    Ok(())
}

async fn restore_foreign_keys(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    if txn.get_database_backend() == DatabaseBackend::MySql {
        txn.execute(Statement::from_string(
            DatabaseBackend::MySql,
            "SET FOREIGN_KEY_CHECKS = 1",
        ))
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::EntityTrait;

    use super::*;

    async fn db() -> DatabaseConnection {
        let db = models::db::connect_in_memory().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn sample_service(id: i32, name: &str) -> service::Dto {
        service::Dto {
            id,
            category: "Hair".into(),
            name: name.into(),
            description: "".into(),
            duration: 60,
            price: 50.0,
            image_url: "".into(),
            alt_text: "".into(),
        }
    }

    #[tokio::test]
    async fn push_replaces_only_present_collections() {
        let db = db().await;

        // Seed a product directly; the snapshot will not mention products.
        product::Dto {
            id: 0,
            category: "Care".into(),
            name: "Shampoo".into(),
            description: "".into(),
            price: 12.0,
            stock: 3,
            image_url: "".into(),
            alt_text: "".into(),
        }
        .active_model()
        .insert(&db)
        .await
        .unwrap();

        let snapshot = SyncSnapshot {
            services: Some(vec![sample_service(10, "Cut"), sample_service(11, "Color")]),
            ..Default::default()
        };
        push(&db, snapshot).await.unwrap();

        let pulled = pull(&db).await.unwrap();
        let services = pulled.services.unwrap();
        assert_eq!(services.len(), 2);
        // Client ids survive the push
        assert!(services.iter().any(|s| s.id == 10));
        assert!(services.iter().any(|s| s.id == 11));
        // Absent collection untouched
        assert_eq!(pulled.products.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn push_is_atomic_on_failure() {
        let db = db().await;

        push(
            &db,
            SyncSnapshot { services: Some(vec![sample_service(1, "Keep")]), ..Default::default() },
        )
        .await
        .unwrap();

        // Duplicate primary key makes the second insert fail; the delete
        // that preceded it must be rolled back.
        let bad = SyncSnapshot {
            services: Some(vec![sample_service(7, "A"), sample_service(7, "B")]),
            ..Default::default()
        };
        assert!(push(&db, bad).await.is_err());

        let services = pull(&db).await.unwrap().services.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Keep");
    }

    #[tokio::test]
    async fn settings_row_is_updated_in_place() {
        let db = db().await;

        let mut dto: settings::Dto =
            settings::Entity::find_by_id(settings::SETTINGS_ROW_ID)
                .one(&db)
                .await
                .unwrap()
                .unwrap()
                .into();
        dto.salon_name = "Renamed".into();

        push(&db, SyncSnapshot { settings: Some(dto), ..Default::default() }).await.unwrap();

        let rows = settings::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].salon_name, "Renamed");
    }

    #[tokio::test]
    async fn users_are_never_synced() {
        assert_eq!(SYNC_EXCLUDED_TABLES, &["users"]);
        // The snapshot shape has no users field at all.
        let json = serde_json::to_value(SyncSnapshot::default()).unwrap();
        assert!(json.get("users").is_none());
    }
}
