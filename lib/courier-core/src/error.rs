//! Error types for courier.

use std::borrow::Cow;

use derive_more::Display;

/// Boxed underlying cause attached to an [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for courier operations.
///
/// The four HTTP variants are chosen by [`Error::from_status`]; every
/// variant exposes a [`message`](Error::message) and a
/// [`status`](Error::status) (0 when no HTTP status is involved).
#[derive(Debug, Display)]
pub enum Error {
    /// 401 Unauthorized.
    #[display("authentication failed ({status}): {message}")]
    Authentication {
        /// HTTP status code.
        status: u16,
        /// Server message or reason phrase.
        message: String,
        /// Underlying cause, if any.
        cause: Option<BoxError>,
    },

    /// 4xx other than 401.
    #[display("client error {status}: {message}")]
    ClientRequest {
        /// HTTP status code.
        status: u16,
        /// Server message or reason phrase.
        message: String,
        /// Underlying cause, if any.
        cause: Option<BoxError>,
    },

    /// 5xx.
    #[display("server error {status}: {message}")]
    ServerResponse {
        /// HTTP status code.
        status: u16,
        /// Reason phrase.
        message: String,
        /// Underlying cause, if any.
        cause: Option<BoxError>,
    },

    /// Any other failing status.
    #[display("HTTP error {status}: {message}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Reason phrase.
        message: String,
        /// Underlying cause, if any.
        cause: Option<BoxError>,
    },

    /// A success body could not be converted to the requested type.
    #[display("decode error: {message}")]
    Decode {
        /// What went wrong.
        message: String,
        /// Underlying cause, if any.
        cause: Option<BoxError>,
    },

    /// The single-read body was already taken.
    #[display("response body already consumed")]
    BodyConsumed,

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    InvalidRequest(String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Authentication { cause, .. }
            | Self::ClientRequest { cause, .. }
            | Self::ServerResponse { cause, .. }
            | Self::Response { cause, .. }
            | Self::Decode { cause, .. } => cause
                .as_deref()
                .map(|cause| cause as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl Error {
    /// Map a failing status code to the matching error variant.
    ///
    /// 401 gives [`Error::Authentication`], 400..499 gives
    /// [`Error::ClientRequest`], 500..600 gives [`Error::ServerResponse`] and
    /// anything else gives [`Error::Response`]. The 4xx band is half-open at
    /// 499.
    #[must_use]
    pub fn from_status(message: impl Into<String>, status: u16, cause: Option<BoxError>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Authentication {
                status,
                message,
                cause,
            },
            400..499 => Self::ClientRequest {
                status,
                message,
                cause,
            },
            500..600 => Self::ServerResponse {
                status,
                message,
                cause,
            },
            _ => Self::Response {
                status,
                message,
                cause,
            },
        }
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::Decode {
            message: message.into(),
            cause,
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Human-readable message, without the variant prefix.
    #[must_use]
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            Self::Authentication { message, .. }
            | Self::ClientRequest { message, .. }
            | Self::ServerResponse { message, .. }
            | Self::Response { message, .. }
            | Self::Decode { message, .. } => Cow::Borrowed(message),
            Self::Connection(message) | Self::Tls(message) | Self::InvalidRequest(message) => {
                Cow::Borrowed(message)
            }
            Self::BodyConsumed | Self::Timeout => Cow::Owned(self.to_string()),
        }
    }

    /// HTTP status code, or 0 for errors without one.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Authentication { status, .. }
            | Self::ClientRequest { status, .. }
            | Self::ServerResponse { status, .. }
            | Self::Response { status, .. } => *status,
            _ => 0,
        }
    }

    /// Returns `true` if this is a 401 error.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a 4xx error, 401 included.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::ClientRequest { .. })
    }

    /// Returns `true` if this is a 5xx error.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerResponse { .. })
    }

    /// Returns `true` if a success body failed to decode.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string(), Some(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn error_display() {
        insta::assert_snapshot!(
            Error::from_status("quota exceeded", 400, None),
            @"client error 400: quota exceeded"
        );
        insta::assert_snapshot!(
            Error::from_status("Unauthorized", 401, None),
            @"authentication failed (401): Unauthorized"
        );
        insta::assert_snapshot!(
            Error::from_status("Service Unavailable", 503, None),
            @"server error 503: Service Unavailable"
        );
        insta::assert_snapshot!(Error::BodyConsumed, @"response body already consumed");
        insta::assert_snapshot!(
            Error::connection("failed to connect"),
            @"connection error: failed to connect"
        );
    }

    #[test]
    fn from_status_mapping() {
        check!(Error::from_status("m", 401, None).is_authentication());
        check!(matches!(Error::from_status("m", 400, None), Error::ClientRequest { .. }));
        check!(matches!(Error::from_status("m", 404, None), Error::ClientRequest { .. }));
        check!(matches!(Error::from_status("m", 498, None), Error::ClientRequest { .. }));
        check!(matches!(Error::from_status("m", 499, None), Error::Response { .. }));
        check!(matches!(Error::from_status("m", 500, None), Error::ServerResponse { .. }));
        check!(matches!(Error::from_status("m", 599, None), Error::ServerResponse { .. }));
        check!(matches!(Error::from_status("m", 600, None), Error::Response { .. }));
        check!(matches!(Error::from_status("m", 302, None), Error::Response { .. }));
    }

    #[test]
    fn error_status_and_message() {
        let err = Error::from_status("quota exceeded", 413, None);
        check!(err.status() == 413);
        check!(err.message() == "quota exceeded");
        check!(err.is_client_error());
        check!(!err.is_server_error());

        let err = Error::Timeout;
        check!(err.status() == 0);
        check!(err.message() == "request timeout");
        check!(!err.is_client_error());

        let err = Error::decode("missing field `id`", None);
        check!(err.status() == 0);
        check!(err.is_decode());
    }

    #[test]
    fn error_source_is_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = Error::from_status("Bad Gateway", 502, Some(Box::new(io)));
        let_assert!(Some(source) = err.source());
        check!(source.to_string() == "eof");

        check!(Error::from_status("Bad Gateway", 502, None).source().is_none());
        check!(Error::BodyConsumed.source().is_none());
    }

    #[test]
    fn error_from_serde_json() {
        let json_err = serde_json::from_str::<u32>("nope").expect_err("not a number");
        let err = Error::from(json_err);
        check!(err.is_decode());
        check!(err.source().is_some());
    }

    #[test]
    fn error_predicates() {
        check!(Error::Timeout.is_timeout());
        check!(!Error::from_status("Not Found", 404, None).is_timeout());
        check!(Error::connection("failed").is_connection());
        check!(!Error::Timeout.is_connection());
        check!(Error::from_status("m", 500, None).is_server_error());
    }
}
