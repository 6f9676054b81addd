use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 3002, worker_threads: None }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Full connection URL; composed from DB_HOST/DB_USER/DB_PASSWORD/DB_NAME
    /// when left empty.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 { 10 }
fn default_acquire_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    /// Base URL of the SPA; password-reset links point here.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), frontend_url: default_frontend_url() }
    }
}

fn default_frontend_url() -> String { "http://localhost:5173".into() }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    /// Comma-separated in env (`ALLOWED_ORIGINS`), list in TOML.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EmailConfig {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub pass: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
}

fn default_smtp_host() -> String { "smtp.gmail.com".into() }

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        !self.user.is_empty() && !self.pass.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
    #[serde(default)]
    pub frontend_dist: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self { uploads_dir: default_uploads_dir(), frontend_dist: None }
    }
}

fn default_uploads_dir() -> String { "uploads".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from config.toml (when present), overlay environment variables and
    /// validate. Boot aborts on error; callers treat a failure as fatal.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.overlay_env();
        cfg.validate()?;
        Ok(cfg)
    }

    fn overlay_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(url) = std::env::var("FRONTEND_URL") {
            self.auth.frontend_url = url;
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            self.cors.allowed_origins =
                origins.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
        }
        if let Ok(user) = std::env::var("EMAIL_USER") {
            self.email.user = user;
        }
        if let Ok(pass) = std::env::var("EMAIL_PASS") {
            self.email.pass = pass;
        }
        if let Ok(dist) = std::env::var("FRONTEND_DIST") {
            self.assets.frontend_dist = Some(dist);
        }
        self.database.overlay_env();
    }

    fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET is required; set it in .env or config.toml"));
        }
        if self.auth.jwt_secret.len() < 32 {
            warn!("JWT_SECRET is shorter than 32 characters; consider a stronger secret");
        }
        if !self.email.is_configured() {
            warn!("EMAIL_USER/EMAIL_PASS not set; email notifications are disabled");
        }
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        self.database.validate()
    }
}

impl DatabaseConfig {
    fn overlay_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.url = url;
            return;
        }
        if self.url.trim().is_empty() {
            // Compose a MySQL URL from the discrete variables the deployment uses.
            let host = std::env::var("DB_HOST").unwrap_or_default();
            let user = std::env::var("DB_USER").unwrap_or_default();
            let pass = std::env::var("DB_PASSWORD").unwrap_or_default();
            let name = std::env::var("DB_NAME").unwrap_or_default();
            if !host.is_empty() && !user.is_empty() && !name.is_empty() {
                self.url = format!("mysql://{user}:{pass}@{host}/{name}");
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!(
                "database URL is empty; set DATABASE_URL or DB_HOST/DB_USER/DB_PASSWORD/DB_NAME"
            ));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("mysql://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database URL must start with mysql:// or sqlite:"));
        }
        if self.max_connections == 0 {
            return Err(anyhow!("database.max_connections must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4000

            [database]
            url = "mysql://root:pw@localhost/salon"

            [auth]
            jwt_secret = "a-very-long-secret-value-for-testing!!"

            [cors]
            allowed_origins = ["http://localhost:5173"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.cors.allowed_origins.len(), 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_secret_rejected() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "mysql://root@localhost/salon".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_database_scheme_rejected() {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = "x".repeat(40);
        cfg.database.url = "postgres://nope".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn email_configured_requires_both_parts() {
        let mut email = EmailConfig::default();
        assert!(!email.is_configured());
        email.user = "salon@example.com".into();
        assert!(!email.is_configured());
        email.pass = "app-password".into();
        assert!(email.is_configured());
    }
}
