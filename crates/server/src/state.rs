use std::{path::PathBuf, sync::Arc, time::Instant};

use sea_orm::DatabaseConnection;

use service::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    /// SPA base URL; password-reset links point here.
    pub frontend_url: String,
    pub mailer: Arc<dyn Mailer>,
    /// Address booking/enrollment notifications go to; empty disables them.
    pub notify_to: String,
    pub uploads_dir: PathBuf,
    pub started_at: Instant,
}
