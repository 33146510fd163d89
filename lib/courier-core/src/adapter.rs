//! Generic response adapter.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::{BodyStream, Error, HttpResponse, NativeResponse, Result, StatusCategory, classify};

/// Wraps one transport-native response behind [`HttpResponse`].
///
/// The adapter owns the native response for its whole lifetime and releases
/// it exactly once, when dropped, whether decoding succeeded, failed or was
/// never attempted. The body can be taken once; later attempts fail with
/// [`Error::BodyConsumed`].
///
/// # Example
///
/// ```
/// use courier_core::{BufferedResponse, Error, HttpResponse, Json, ResponseAdapter};
///
/// let native = BufferedResponse::new(400, br#"{"code":400,"message":"quota exceeded"}"#.as_slice());
/// let mut response = ResponseAdapter::wrap(native);
///
/// let err = response.entity::<Json<serde_json::Value>>().unwrap_err();
/// assert!(matches!(err, Error::ClientRequest { status: 400, .. }));
/// assert_eq!(err.message(), "quota exceeded");
/// ```
pub struct ResponseAdapter<R: NativeResponse> {
    native: R,
    body_taken: bool,
}

impl<R: NativeResponse> ResponseAdapter<R> {
    /// Wrap a native response.
    #[must_use]
    pub fn wrap(native: R) -> Self {
        Self {
            native,
            body_taken: false,
        }
    }

    /// The native response.
    #[must_use]
    pub fn inner(&self) -> &R {
        &self.native
    }

    /// Mutable access to the native response.
    ///
    /// Taking the body through this reference bypasses the single-read guard.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.native
    }

    /// Status category of this response.
    #[must_use]
    pub fn category(&self) -> StatusCategory {
        classify(self.native.status_code())
    }

    /// Whether the body has been taken.
    #[must_use]
    pub const fn is_body_consumed(&self) -> bool {
        self.body_taken
    }
}

impl<R: NativeResponse> HttpResponse for ResponseAdapter<R> {
    fn status(&self) -> u16 {
        self.native.status_code()
    }

    fn reason(&self) -> String {
        self.native.reason_phrase()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.native.header_value(name)
    }

    fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        for name in self.native.header_names() {
            if let Some(value) = self.native.header_value(&name) {
                headers.entry(name).or_insert(value);
            }
        }
        headers
    }

    fn input_stream(&mut self) -> Result<BodyStream> {
        if self.body_taken {
            return Err(Error::BodyConsumed);
        }
        self.body_taken = true;
        Ok(self.native.take_body())
    }
}

impl<R: NativeResponse> Drop for ResponseAdapter<R> {
    fn drop(&mut self) {
        trace!(
            status = self.native.status_code(),
            body_consumed = self.body_taken,
            "releasing response"
        );
        self.native.release();
    }
}

impl<R: NativeResponse + fmt::Debug> fmt::Debug for ResponseAdapter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseAdapter")
            .field("native", &self.native)
            .field("body_taken", &self.body_taken)
            .finish()
    }
}

impl<R: NativeResponse> From<R> for ResponseAdapter<R> {
    fn from(native: R) -> Self {
        Self::wrap(native)
    }
}
