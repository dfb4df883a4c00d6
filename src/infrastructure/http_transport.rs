// reqwest-backed transport for the push endpoint
use crate::application::push_transport::PushTransport;
use crate::error::{PushError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxy, TLS roots, timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PushTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| PushError::Transport(format!("failed to send request to {url}: {e}")))?;

        // Failures are reported in the body, so the status code is only logged.
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Push endpoint responded with status {}", status);
        }

        response
            .text()
            .await
            .map_err(|e| PushError::Transport(format!("failed to read response body: {e}")))
    }
}
