// Widget pusher - Shapes widget data and delivers it to one widget slot
use crate::application::push_transport::PushTransport;
use crate::domain::payload::{Payload, PushResponse};
use crate::domain::widget::{
    self, FunnelOptions, FunnelStage, GeckometerBound, LineSettings, Metric, PieSlice, RagEntry,
    TextEntry, WidgetData,
};
use crate::error::{PushError, Result};
use crate::infrastructure::config::PushConfig;
use crate::infrastructure::http_transport::HttpTransport;
use serde_json::Value;
use std::sync::Arc;

/// Pushes updates to a single dashboard widget.
///
/// Each method performs exactly one request. The configuration is owned by the
/// pusher, so changing settings means building a new pusher.
#[derive(Clone)]
pub struct WidgetPusher {
    config: PushConfig,
    widget_key: String,
    transport: Arc<dyn PushTransport>,
}

impl WidgetPusher {
    pub fn new(config: PushConfig, widget_key: impl Into<String>) -> Self {
        Self::with_transport(config, widget_key, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(
        config: PushConfig,
        widget_key: impl Into<String>,
        transport: Arc<dyn PushTransport>,
    ) -> Self {
        Self {
            config,
            widget_key: widget_key.into(),
            transport,
        }
    }

    pub fn widget_key(&self) -> &str {
        &self.widget_key
    }

    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/send/{}",
            self.config.base_url(),
            self.config.api_version(),
            urlencoding::encode(&self.widget_key)
        )
    }

    /// Send already-shaped widget data and return the service's success value.
    pub async fn push(&self, data: WidgetData) -> Result<Value> {
        let api_key = self.config.api_key();
        if api_key.is_empty() {
            return Err(PushError::Configuration("Api key not configured".to_string()));
        }

        let body = serde_json::to_string(&Payload::new(api_key, &data))?;
        let url = self.endpoint();

        tracing::debug!("Pushing {} bytes to widget {}", body.len(), self.widget_key);
        let raw = self
            .transport
            .post_json(&url, body)
            .await
            .inspect_err(|e| tracing::error!("Push to widget {} failed: {}", self.widget_key, e))?;

        let response = PushResponse::parse(&raw).inspect_err(|e| {
            tracing::error!("Unreadable response for widget {}: {}", self.widget_key, e)
        })?;

        match response.into_result() {
            Ok(success) => {
                tracing::debug!("Widget {} updated", self.widget_key);
                Ok(success)
            }
            Err(e) => {
                tracing::warn!("Widget {} rejected update: {}", self.widget_key, e);
                Err(e)
            }
        }
    }

    pub async fn number_and_secondary_value(
        &self,
        value: impl Into<Metric>,
        previous_value: impl Into<Metric>,
    ) -> Result<Value> {
        self.push(widget::number_and_secondary_value(value, previous_value))
            .await
    }

    pub async fn text(&self, items: Vec<TextEntry>) -> Result<Value> {
        self.push(widget::text(items)).await
    }

    pub async fn rag(&self, red: RagEntry, amber: RagEntry, green: RagEntry) -> Result<Value> {
        self.push(widget::rag(red, amber, green)).await
    }

    pub async fn line<M: Into<Metric>>(
        &self,
        values: impl IntoIterator<Item = M>,
        settings: LineSettings,
    ) -> Result<Value> {
        self.push(widget::line(values, settings)).await
    }

    pub async fn pie(&self, items: Vec<PieSlice>) -> Result<Value> {
        self.push(widget::pie(items)).await
    }

    pub async fn geckometer(
        &self,
        value: impl Into<Metric>,
        min: GeckometerBound,
        max: GeckometerBound,
    ) -> Result<Value> {
        self.push(widget::geckometer(value, min, max)).await
    }

    pub async fn funnel(&self, items: Vec<FunnelStage>, options: FunnelOptions) -> Result<Value> {
        self.push(widget::funnel(items, options)).await
    }
}

impl std::fmt::Debug for WidgetPusher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetPusher")
            .field("widget_key", &self.widget_key)
            .field("api_version", &self.config.api_version())
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct MockTransport {
        reply: Result<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockTransport {
        fn replying(body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(body.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(PushError::Transport(message.to_string())),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn last_body(&self) -> serde_json::Value {
            let calls = self.calls();
            let (_, body) = calls.last().expect("no request recorded");
            serde_json::from_str(body).unwrap()
        }
    }

    #[async_trait]
    impl PushTransport for MockTransport {
        async fn post_json(&self, url: &str, body: String) -> Result<String> {
            self.calls.lock().unwrap().push((url.to_string(), body));
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err(PushError::Transport(message)) => Err(PushError::Transport(message.clone())),
                Err(other) => panic!("unsupported mock reply: {other:?}"),
            }
        }
    }

    fn pusher(config: PushConfig, transport: Arc<MockTransport>) -> WidgetPusher {
        WidgetPusher::with_transport(config, "12345-abcde", transport)
    }

    #[tokio::test]
    async fn test_empty_api_key_fails_without_request() {
        let transport = MockTransport::replying(r#"{"success": true}"#);
        let pusher = pusher(PushConfig::default(), transport.clone());

        let err = pusher.number_and_secondary_value(1, 2).await.unwrap_err();
        match err {
            PushError::Configuration(message) => assert_eq!(message, "Api key not configured"),
            other => panic!("expected configuration error, got {other:?}"),
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_returns_success_value() {
        let transport = MockTransport::replying(r#"{"success": true}"#);
        let pusher = pusher(PushConfig::new("key"), transport.clone());

        let result = pusher.number_and_secondary_value(10, 8).await.unwrap();
        assert_eq!(result, json!(true));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_api_error_carries_message() {
        let transport = MockTransport::replying(r#"{"success": false, "error": "bad key"}"#);
        let pusher = pusher(PushConfig::new("key"), transport);

        match pusher.text(vec![TextEntry::plain("hi")]).await {
            Err(PushError::Api { message }) => assert_eq!(message, "bad key"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_response_is_format_error() {
        let transport = MockTransport::replying("Service Unavailable");
        let pusher = pusher(PushConfig::new("key"), transport);

        let result = pusher.pie(vec![PieSlice::new(1)]).await;
        assert!(matches!(result, Err(PushError::ResponseFormat(_))));
    }

    #[tokio::test]
    async fn test_non_finite_value_fails_without_request() {
        let transport = MockTransport::replying(r#"{"success": true}"#);
        let pusher = pusher(PushConfig::new("key"), transport.clone());

        let result = pusher.line([f64::NAN], LineSettings::default()).await;
        assert!(matches!(result, Err(PushError::Serialization(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_surfaced() {
        let transport = MockTransport::failing("connection refused");
        let pusher = pusher(PushConfig::new("key"), transport.clone());

        let result = pusher.funnel(vec![FunnelStage::new(5)], FunnelOptions::default()).await;
        assert!(matches!(result, Err(PushError::Transport(_))));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_request_url_and_body() {
        let transport = MockTransport::replying(r#"{"success": true}"#);
        let config = PushConfig::new("secret").with_api_version("v2");
        let pusher = pusher(config, transport.clone());

        pusher
            .geckometer(5, GeckometerBound::new(1), GeckometerBound::new(10))
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].0, "https://push.geckoboard.com/v2/send/12345-abcde");
        assert_eq!(
            transport.last_body(),
            json!({
                "apiKey": "secret",
                "data": {
                    "item": 5,
                    "min": {"text": "Min value", "value": 1},
                    "max": {"text": "Max value", "value": 10}
                }
            })
        );
    }

    #[tokio::test]
    async fn test_each_builder_sends_one_request() {
        let transport = MockTransport::replying(r#"{"success": true}"#);
        let pusher = pusher(PushConfig::new("key"), transport.clone());

        pusher
            .rag(RagEntry::new(1, "r"), RagEntry::new(2, "a"), RagEntry::new(3, "g"))
            .await
            .unwrap();
        assert_eq!(transport.last_body()["data"]["item"][2]["text"], "g");

        pusher.line([1, 2, 3], LineSettings::default()).await.unwrap();
        assert_eq!(transport.last_body()["data"]["settings"], json!({}));

        let options = FunnelOptions {
            reverse: true,
            hide_percentage: true,
        };
        pusher.funnel(vec![FunnelStage::new(3)], options).await.unwrap();
        assert_eq!(transport.last_body()["data"]["type"], "reverse");
        assert_eq!(transport.last_body()["data"]["percentage"], "hide");

        assert_eq!(transport.calls().len(), 3);
    }

    #[test]
    fn test_widget_key_is_escaped_in_endpoint() {
        let pusher = WidgetPusher::new(PushConfig::new("key"), "my widget/1");
        assert_eq!(pusher.widget_key(), "my widget/1");
        assert_eq!(
            pusher.endpoint(),
            "https://push.geckoboard.com/v1/send/my%20widget%2F1"
        );
    }
}
