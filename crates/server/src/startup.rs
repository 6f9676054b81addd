use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Instant};

use axum::http::HeaderValue;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::{routes, state::AppState};
use common::utils::logging::init_logging_default;
use configs::AppConfig;
use service::mailer::{Mailer, NoopMailer, SmtpMailer};

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> =
        allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn build_mailer(cfg: &configs::EmailConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    if cfg.is_configured() {
        Ok(Arc::new(SmtpMailer::from_config(cfg)?))
    } else {
        Ok(Arc::new(NoopMailer))
    }
}

/// Public entry: load config, migrate, build the app and serve until a
/// shutdown signal arrives.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let cfg = AppConfig::load_and_validate()?;
    common::env::ensure_env(cfg.assets.frontend_dist.as_deref(), &cfg.assets.uploads_dir).await?;

    let db = models::db::connect(&cfg.database).await?;
    Migrator::up(&db, None).await?;
    info!("database connected and migrated");

    let state = AppState {
        db,
        jwt_secret: cfg.auth.jwt_secret.clone(),
        frontend_url: cfg.auth.frontend_url.clone(),
        mailer: build_mailer(&cfg.email)?,
        notify_to: cfg.email.user.clone(),
        uploads_dir: PathBuf::from(&cfg.assets.uploads_dir),
        started_at: Instant::now(),
    };

    let cors = build_cors(&cfg.cors.allowed_origins);
    let app = routes::build_router(state, cors, cfg.assets.frontend_dist.clone());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
