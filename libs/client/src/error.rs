use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("not logged in")]
    NotLoggedIn,

    #[error("in local store: {}: {}", message, source)]
    InStore {
        message: String,
        source: std::io::Error,
    },

    #[error("in serde_json while handling the local store: {}: {}", message, source)]
    InSerdeJson {
        message: String,
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Whether the server refused the bearer token (401 or 403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Api { status: 401 | 403, .. })
    }
}
