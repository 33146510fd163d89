//! Connector traits.
//!
//! - [`Connector`] - sends a request through one HTTP library
//! - [`ConnectorExt`] - wraps what comes back in a [`ResponseAdapter`]
//!
//! Implement [`Connector`] to plug a new HTTP library in; callers then use
//! the same [`HttpResponse`](crate::HttpResponse) contract whatever the
//! library.

use std::future::Future;

use bytes::Bytes;

use crate::{NativeResponse, ResponseAdapter, Result};

/// One underlying HTTP library.
///
/// # Example
///
/// ```ignore
/// use courier_core::{BufferedResponse, Connector, Result};
///
/// #[derive(Clone)]
/// struct Canned(u16, &'static str);
///
/// impl Connector for Canned {
///     type Response = BufferedResponse;
///
///     async fn send(&self, _request: http::Request<Bytes>) -> Result<Self::Response> {
///         Ok(BufferedResponse::new(self.0, self.1.as_bytes()))
///     }
/// }
/// ```
pub trait Connector: Send + Sync {
    /// The library's native response.
    type Response: NativeResponse + Send;

    /// Execute a request and return the native response.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails before a response arrives:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> impl Future<Output = Result<Self::Response>> + Send;
}

/// Extension trait for [`Connector`].
pub trait ConnectorExt: Connector {
    /// Send a request and wrap the response.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Connector::send`] fails.
    fn execute(
        &self,
        request: http::Request<Bytes>,
    ) -> impl Future<Output = Result<ResponseAdapter<Self::Response>>> + Send {
        async move { self.send(request).await.map(ResponseAdapter::wrap) }
    }
}

// Blanket implementation for all Connector implementors
impl<T: Connector> ConnectorExt for T {}
