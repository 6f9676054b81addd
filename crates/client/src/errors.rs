use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(String),

    /// The server answered with an error body; `message` is its
    /// user-facing explanation.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("persistence error: {0}")]
    Persist(String),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e.to_string())
    }
}
