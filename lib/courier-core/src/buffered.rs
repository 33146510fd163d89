//! Owned, transport-neutral response.
//!
//! [`BufferedResponse`] is the native response for transports that hand over
//! plain parts (status, reason, header list, body bytes), and for mock
//! connectors in tests.
//!
//! # Example
//!
//! ```
//! use courier_core::{BufferedResponse, HttpResponse, Json, ResponseAdapter};
//!
//! let native = BufferedResponse::new(200, br#"{"id":"abc"}"#.as_slice())
//!     .header("Content-Type", "application/json");
//! let mut response = ResponseAdapter::wrap(native);
//! let value = response.entity::<Json<serde_json::Value>>().expect("decoded");
//! assert_eq!(value.expect("present")["id"], "abc");
//! ```

use std::fmt;

use bytes::Bytes;

use crate::{BodyStream, NativeResponse, native::canonical_reason};

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// HTTP response with status, reason phrase, ordered headers and body.
///
/// Header names may repeat; lookups return the first occurrence.
pub struct BufferedResponse {
    status: u16,
    reason: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    on_release: Option<ReleaseHook>,
}

impl BufferedResponse {
    /// Creates a new response with the canonical reason phrase.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            reason: canonical_reason(status).to_string(),
            headers: Vec::new(),
            body: body.into(),
            on_release: None,
        }
    }

    /// Set the reason phrase.
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Run `hook` when the response is released.
    #[must_use]
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    /// Response headers, in received order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into (status, reason, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, String, Vec<(String, String)>, Bytes) {
        (self.status, self.reason, self.headers, self.body)
    }
}

impl fmt::Debug for BufferedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}

impl NativeResponse for BufferedResponse {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn reason_phrase(&self) -> String {
        self.reason.clone()
    }

    fn header_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (name, _) in &self.headers {
            if !names.iter().any(|seen| seen.eq_ignore_ascii_case(name)) {
                names.push(name.clone());
            }
        }
        names
    }

    fn header_value(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    fn take_body(&mut self) -> BodyStream {
        BodyStream::from_bytes(std::mem::take(&mut self.body))
    }

    fn release(&mut self) {
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}
