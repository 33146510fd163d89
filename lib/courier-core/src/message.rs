//! Best-effort extraction of server error messages.
//!
//! Error bodies are often truncated, wrapped in vendor envelopes
//! (`{"badRequest": {"message": "...", "code": 400}}`) or not JSON at all, so
//! the message is located with a pattern instead of a full parse.

use std::sync::LazyLock;

use regex::Regex;

/// Key that must appear in the body before the pattern is attempted.
const MESSAGE_KEY: &str = "\"message\"";

/// First `"message": "<value>"` pair; the value stops at the first unescaped quote.
#[allow(clippy::expect_used)]
static MESSAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"message"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid message pattern")
});

/// Extract a human-readable error message from a response body.
///
/// Returns `None` when the body has no `"message"` string field, when the
/// value is empty, or when the body cannot be matched at all. JSON escape
/// sequences in the value are decoded when they are valid.
///
/// # Example
///
/// ```
/// use courier_core::extract_message;
///
/// let body = br#"{"code":400,"message":"quota exceeded"}"#;
/// assert_eq!(extract_message(body).as_deref(), Some("quota exceeded"));
/// assert_eq!(extract_message(b"<html>Bad Request</html>"), None);
/// ```
#[must_use]
pub fn extract_message(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    if !text.contains(MESSAGE_KEY) {
        return None;
    }

    let raw = MESSAGE_PATTERN.captures(&text)?.get(1)?.as_str();
    if raw.is_empty() {
        return None;
    }

    let message = serde_json::from_str::<String>(&format!("\"{raw}\""))
        .unwrap_or_else(|_| raw.to_string());
    Some(message)
}
