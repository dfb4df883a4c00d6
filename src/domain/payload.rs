// Request body and response interpretation
use crate::domain::widget::WidgetData;
use crate::error::{PushError, Result};
use serde::Serialize;
use serde_json::Value;

/// Body of a single push: the API key plus the widget-shaped data.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
    pub data: &'a WidgetData,
}

impl<'a> Payload<'a> {
    pub fn new(api_key: &'a str, data: &'a WidgetData) -> Self {
        Self { api_key, data }
    }
}

/// Parsed reply from the push endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PushResponse {
    pub success: Value,
    pub error: Option<String>,
}

impl PushResponse {
    /// Parse a raw response body. Anything other than a JSON object is a format error.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| PushError::ResponseFormat(e.to_string()))?;

        let Value::Object(mut fields) = value else {
            return Err(PushError::ResponseFormat(format!(
                "expected a JSON object, got: {body}"
            )));
        };

        let success = fields.remove("success").unwrap_or(Value::Null);
        let error = match fields.remove("error") {
            Some(Value::String(message)) => Some(message),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Ok(Self { success, error })
    }

    /// `null` and `false` are failures; every other value counts as success.
    pub fn is_success(&self) -> bool {
        !matches!(self.success, Value::Null | Value::Bool(false))
    }

    /// Success value on acknowledgement, `PushError::Api` otherwise.
    pub fn into_result(self) -> Result<Value> {
        if self.is_success() {
            Ok(self.success)
        } else {
            Err(PushError::api(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}
