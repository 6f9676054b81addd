use serde::{Deserialize, Serialize};

/// Health check payload returned by `GET /api/health`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
