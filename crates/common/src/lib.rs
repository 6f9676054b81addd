pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health {
            status: "healthy".into(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            uptime: 1.5,
            database: "connected".into(),
            error: None,
        };
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database"], "connected");
        // error is omitted when absent
        assert!(json.get("error").is_none());
    }
}
