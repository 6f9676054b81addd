use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Open the pooled connection described by the validated config.
pub async fn connect(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// In-memory sqlite connection for tests. A single pooled connection keeps
/// every session on the same database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    Ok(db)
}
