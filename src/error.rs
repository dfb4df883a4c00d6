// Error kinds surfaced by a push
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushError {
    /// API key missing or empty. Raised before any network activity.
    #[error("{0}")]
    Configuration(String),

    /// The request never produced a readable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not a JSON object.
    #[error("malformed response: {0}")]
    ResponseFormat(String),

    /// The service answered with `success: false`.
    #[error("api error: {message}")]
    Api { message: String },

    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PushError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PushError>;
