//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure expected directories exist; warn on missing optional ones.
///
/// The uploads directory is created if absent (uploaded images land there);
/// a missing frontend dist is only a warning since the API can run headless.
pub async fn ensure_env(frontend_dist: Option<&str>, uploads_dir: &str) -> anyhow::Result<()> {
    if let Some(dist) = frontend_dist {
        if tokio::fs::metadata(dist).await.is_err() {
            warn!(%dist, "frontend dist directory not found; SPA requests will 404");
        }
    }
    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {uploads_dir}: {e}"))?;
    Ok(())
}
