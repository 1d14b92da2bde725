use tracing::{debug, error};

use crate::errors::ClientError;
use crate::gateway::operations::{ResponseKind, Route};
use crate::gateway::Exchange;

const BODY_PREVIEW_CHARS: usize = 500;

/// Sees every response and every error the gateway produces.
///
/// Only shared references are handed over, so an observer cannot change what the
/// caller gets back.
pub trait GatewayObserver: Send + Sync {
    fn on_response(&self, route: &Route, exchange: &Exchange);
    fn on_error(&self, route: &Route, error: &ClientError);
}

/// Default observer: structured `tracing` events.
pub struct TracingObserver;

impl GatewayObserver for TracingObserver {
    fn on_response(&self, route: &Route, exchange: &Exchange) {
        debug!(
            method = %route.method,
            path = %route.path,
            status = exchange.status.as_u16(),
            elapsed_ms = exchange.elapsed.as_millis() as u64,
            "API response: {}",
            preview(route.response, &exchange.body)
        );
    }

    fn on_error(&self, route: &Route, err: &ClientError) {
        error!(
            method = %route.method,
            path = %route.path,
            "API error: {err}"
        );
    }
}

fn preview(kind: ResponseKind, body: &[u8]) -> String {
    match kind {
        ResponseKind::Binary => format!("<{} bytes>", body.len()),
        ResponseKind::Json => {
            let text = String::from_utf8_lossy(body);
            if text.chars().count() > BODY_PREVIEW_CHARS {
                let cut: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
                format!("{cut}…")
            } else {
                text.into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_preview_is_length_only() {
        assert_eq!(preview(ResponseKind::Binary, b"%PDF-1.4\xff"), "<9 bytes>");
    }

    #[test]
    fn test_json_preview_truncates() {
        let long = "a".repeat(BODY_PREVIEW_CHARS + 10);
        let shown = preview(ResponseKind::Json, long.as_bytes());
        assert_eq!(shown.chars().count(), BODY_PREVIEW_CHARS + 1);
        assert!(shown.ends_with('…'));

        assert_eq!(preview(ResponseKind::Json, br#"{"ok":true}"#), r#"{"ok":true}"#);
    }
}
