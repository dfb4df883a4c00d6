// Transport trait for delivering a push
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PushTransport: Send + Sync {
    /// POST a JSON body to `url` and return the raw response body.
    ///
    /// Implementations must not retry and must not interpret the body; a connection
    /// failure maps to `PushError::Transport`.
    async fn post_json(&self, url: &str, body: String) -> Result<String>;
}
