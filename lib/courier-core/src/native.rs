//! Capability view over a transport's native response.
//!
//! A connector only has to implement [`NativeResponse`] for whatever its
//! HTTP library hands back; [`ResponseAdapter`](crate::ResponseAdapter) does
//! the rest.

use bytes::Bytes;

use crate::BodyStream;

/// What the core needs from a transport's response.
pub trait NativeResponse {
    /// HTTP status code.
    fn status_code(&self) -> u16;

    /// Reason phrase, or an empty string when the transport has none.
    fn reason_phrase(&self) -> String;

    /// Distinct header names, in first-seen order.
    fn header_names(&self) -> Vec<String>;

    /// First value of a header, looked up case-insensitively.
    fn header_value(&self, name: &str) -> Option<String>;

    /// Hand over the body.
    ///
    /// Called at most once by the adapter.
    fn take_body(&mut self) -> BodyStream;

    /// Dispose transport-level resources (pooled connection, socket, ...).
    ///
    /// Called exactly once by the adapter when it is dropped.
    fn release(&mut self) {}
}

/// Reason phrase as received on the wire.
///
/// Stored in [`http::Response`] extensions by connectors whose library
/// exposes the raw phrase; otherwise the canonical phrase is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonPhrase(String);

impl ReasonPhrase {
    /// Wrap a reason phrase.
    #[must_use]
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    /// The phrase.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical reason phrase for a status code, or `""`.
#[must_use]
pub fn canonical_reason(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
}

impl NativeResponse for http::Response<Bytes> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    fn reason_phrase(&self) -> String {
        self.extensions().get::<ReasonPhrase>().map_or_else(
            || canonical_reason(self.status().as_u16()).to_string(),
            |phrase| phrase.as_str().to_string(),
        )
    }

    fn header_names(&self) -> Vec<String> {
        self.headers().keys().map(ToString::to_string).collect()
    }

    fn header_value(&self, name: &str) -> Option<String> {
        self.headers()
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
    }

    fn take_body(&mut self) -> BodyStream {
        BodyStream::from_bytes(std::mem::take(self.body_mut()))
    }
}
