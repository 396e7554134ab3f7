use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body sent to clients for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Always `false`
    pub success: bool,
    /// HTTP status code, also used as the response status
    pub status: u16,
    /// Kind name with separators replaced by spaces, e.g. `NOT FOUND`
    #[serde(rename = "type")]
    pub error_type: String,
    /// Client-facing message
    pub message: String,
    /// Diagnostics, only in development
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<Diagnostics>,
}

impl ResponsePayload {
    /// Status as an `http::StatusCode`, 500 if the stored value is invalid
    pub fn status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(self.status).unwrap_or(crate::DEFAULT_STATUS)
    }
}

/// Internals of a failure, never sent outside development
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// The error itself
    pub error: String,
    /// Rendered `source()` chain, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<String>,
    /// Context attached where the error was raised
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    /// Backtrace captured where the error was raised
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl Diagnostics {
    /// Describe an arbitrary error and its sources
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let chain = std::iter::successors(error.source(), |e| e.source())
            .map(ToString::to_string)
            .collect();

        Self {
            error: error.to_string(),
            chain,
            context: None,
            backtrace: None,
        }
    }

    /// Describe only a message, e.g. a panic payload
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            chain: Vec::new(),
            context: None,
            backtrace: None,
        }
    }
}

/// Render a kind name for people: `METHOD_NOT_ALLOWED` -> `METHOD NOT ALLOWED`
pub fn display_type(name: &str) -> String {
    name.replace('_', " ")
}
