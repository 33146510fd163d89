//! HTTP status classification.
//!
//! [`classify`] maps a raw status code to the [`StatusCategory`] that drives
//! [`ResponseAdapter::entity`](crate::ResponseAdapter::entity).

use derive_more::Display;

/// Category of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StatusCategory {
    /// Any status below 400.
    #[display("success")]
    Success,
    /// Exactly 404.
    #[display("not found")]
    NotFound,
    /// Exactly 401.
    #[display("unauthorized")]
    Unauthorized,
    /// 400..500, except 401 and 404.
    #[display("client error")]
    ClientError,
    /// 500..600.
    #[display("server error")]
    ServerError,
    /// Anything else (600 and above).
    #[display("unclassified")]
    Unclassified,
}

impl StatusCategory {
    /// Returns `true` for every category that makes `entity` fail.
    ///
    /// [`NotFound`](Self::NotFound) is not an error: it yields an empty or
    /// absent value.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::ClientError | Self::ServerError | Self::Unclassified
        )
    }

    /// Returns `true` when the response body may carry a server message
    /// worth extracting.
    #[must_use]
    pub const fn carries_message(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::ClientError)
    }
}

/// Classify an HTTP status code.
///
/// 404 and 401 take precedence over the generic 4xx band.
///
/// # Example
///
/// ```
/// use courier_core::{StatusCategory, classify};
///
/// assert_eq!(classify(204), StatusCategory::Success);
/// assert_eq!(classify(401), StatusCategory::Unauthorized);
/// assert_eq!(classify(503), StatusCategory::ServerError);
/// ```
#[must_use]
pub const fn classify(status: u16) -> StatusCategory {
    match status {
        0..=399 => StatusCategory::Success,
        404 => StatusCategory::NotFound,
        401 => StatusCategory::Unauthorized,
        400..=499 => StatusCategory::ClientError,
        500..=599 => StatusCategory::ServerError,
        _ => StatusCategory::Unclassified,
    }
}
