use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Client-level error type.
/// Every gateway call returns `Result<T, ClientError>`; nothing in the gateway swallows one.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{operation} timed out after {}s", .after.as_secs_f32())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Timeout { .. } => true,
            ClientError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Best-effort message for an error notification.
    /// Prefers the backend's `detail` payload and falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ClientError::Timeout { .. } => {
                format!("{fallback} The server took too long to respond.")
            }
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Extracts the `detail` field from a FastAPI-style error body.
///
/// `detail` is either a plain string or a list of validation entries carrying `msg`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        Value::String(s) => Some(s),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_string() {
        let body = br#"{"detail": "JD not analyzed yet"}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("JD not analyzed yet"));
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = br#"{"detail": [{"loc": ["body", "job_id"], "msg": "field required"}]}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("field required"));
    }

    #[test]
    fn test_extract_detail_missing_or_not_json() {
        assert_eq!(extract_detail(br#"{"error": "boom"}"#), None);
        assert_eq!(extract_detail(b"<html>Bad Gateway</html>"), None);
        assert_eq!(extract_detail(br#"{"detail": null}"#), None);
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ClientError::Api {
            status: 400,
            detail: Some("Resume not uploaded".to_string()),
        };
        assert_eq!(err.user_message("Export failed."), "Resume not uploaded");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ClientError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message("Failed to load demo."), "Failed to load demo.");

        let blank = ClientError::Api {
            status: 500,
            detail: Some("   ".to_string()),
        };
        assert_eq!(blank.user_message("Failed."), "Failed.");
    }

    #[test]
    fn test_timeout_is_classified() {
        let err = ClientError::Timeout {
            operation: "demo load",
            after: Duration::from_secs(10),
        };
        assert!(err.is_timeout());
        assert!(err.user_message("Demo failed.").starts_with("Demo failed."));
        assert!(err.to_string().contains("10s"));
        assert!(!ClientError::InvalidBaseUrl("x".into()).is_timeout());
    }
}
