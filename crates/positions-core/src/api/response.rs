use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// A response that arrived, successful or not.
///
/// Non-success statuses are not errors at this layer: the caller decides
/// what a rejection means for its view.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Human-readable message from the body's `message` field.
    ///
    /// The API reports validation failures as an array of strings; those are
    /// joined with ", ". Blank messages count as absent.
    pub fn message(&self) -> Option<String> {
        let message = match self.body.get("message")? {
            Value::String(s) => s.trim().to_string(),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            _ => return None,
        };
        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or_else(|| fallback.to_string())
    }

    /// Decode the body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected body for status {}: {}", self.status, e))
        })
    }

    /// Describe this response as a rejection
    pub fn status_error(&self) -> ApiError {
        ApiError::Status {
            status: self.status.as_u16(),
            message: self.message(),
        }
    }
}
