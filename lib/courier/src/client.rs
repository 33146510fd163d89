//! Connector implementation using hyper-util.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{
    Connector, Error, ReasonPhrase, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
    middleware::LoggingLayer,
};

// ============================================================================
// Type-Erased Service for Middleware Composition
// ============================================================================

/// Type-erased service for middleware composition.
pub type BoxedService = BoxCloneService<http::Request<Bytes>, http::Response<Bytes>, Error>;

/// Future type for Tower Service implementation.
pub type ServiceFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<Bytes>>> + Send + 'static>>;

/// Thread-safe wrapper for `BoxedService`.
///
/// `BoxCloneService` is not `Sync`; [`Connector`] requires it.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: http::Request<Bytes>) -> ServiceFuture {
        // Lock, clone the service, and release the lock immediately
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

// ============================================================================
// Raw Connector
// ============================================================================

/// hyper-util client without middleware.
#[derive(Clone)]
struct RawHyperConnector {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl RawHyperConnector {
    fn new(config: ClientConfig) -> Self {
        let connector = https_connector(&config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    async fn fetch(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = request.uri();
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(Error::invalid_request(format!(
                "request URI must be absolute: {uri}"
            )));
        }
        let request = request.map(Full::new);

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let (mut parts, body) = response.into_parts();

        // hyper only records the phrase when it differs from the canonical one
        if let Some(phrase) = parts.extensions.remove::<hyper::ext::ReasonPhrase>() {
            let phrase = String::from_utf8_lossy(phrase.as_bytes()).into_owned();
            parts.extensions.insert(ReasonPhrase::new(phrase));
        }

        let body = body
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(http::Response::from_parts(parts, body))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<http::Request<Bytes>> for RawHyperConnector {
    type Response = http::Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<Bytes>) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { client.fetch(request).await })
    }
}

// ============================================================================
// Public Connector
// ============================================================================

/// [`Connector`] backed by hyper-util, with connection pooling, TLS and
/// tower middleware.
///
/// Responses come back as `http::Response<Bytes>` with the wire reason
/// phrase preserved, ready for
/// [`ResponseAdapter`](crate::ResponseAdapter).
///
/// # Example
///
/// ```ignore
/// use courier::{ConnectorExt, HttpResponse, HyperConnector, Json};
///
/// let connector = HyperConnector::builder().with_logging().build();
/// let request = http::Request::get("https://compute.example.com/servers/42")
///     .body(bytes::Bytes::new())?;
///
/// let mut response = connector.execute(request).await?;
/// let server = response.entity::<Json<Server>>()?;
/// ```
#[derive(Clone)]
pub struct HyperConnector {
    service: SyncService,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperConnector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperConnector {
    /// Create a new connector with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new connector with custom configuration (no middleware).
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let raw = RawHyperConnector::new(config.clone());
        Self::with_service(BoxCloneService::new(raw), config)
    }

    fn with_service(service: BoxedService, config: ClientConfig) -> Self {
        Self {
            service: SyncService::new(service),
            config,
        }
    }

    /// Create a new connector builder.
    #[must_use]
    pub fn builder() -> HyperConnectorBuilder {
        HyperConnectorBuilder::default()
    }

    /// Get the connector configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for HyperConnector {
    type Response = http::Response<Bytes>;

    async fn send(&self, request: http::Request<Bytes>) -> Result<Self::Response> {
        self.service.call(request).await
    }
}

impl Service<http::Request<Bytes>> for HyperConnector {
    type Response = http::Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        // SyncService is always ready (the underlying service is polled when called)
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<Bytes>) -> Self::Future {
        self.service.call(request)
    }
}

type LayerFn = Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>;

/// Builder for [`HyperConnector`].
///
/// # Example
///
/// ```ignore
/// use courier::HyperConnector;
/// use std::time::Duration;
///
/// let connector = HyperConnector::builder()
///     .timeout(Duration::from_secs(10))
///     .with_logging()
///     .build();
/// ```
#[derive(Default)]
pub struct HyperConnectorBuilder {
    config: ClientConfigBuilder,
    layers: Vec<LayerFn>,
}

impl std::fmt::Debug for HyperConnectorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperConnectorBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperConnectorBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a Tower layer.
    ///
    /// Layers are applied in order: first added = innermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<http::Request<Bytes>, Response = http::Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<http::Request<Bytes>>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Add request/response logging.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Add debug-level logging (includes headers).
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the connector with all configured middleware.
    #[must_use]
    pub fn build(self) -> HyperConnector {
        let config = self.config.build();
        let mut service: BoxedService =
            BoxCloneService::new(RawHyperConnector::new(config.clone()));

        for layer_fn in self.layers {
            service = layer_fn(service);
        }

        HyperConnector::with_service(service, config)
    }
}
