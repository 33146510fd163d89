//! Tower middleware layers for the hyper connector.
//!
//! Layers wrap the connector's `http::Request<Bytes>` →
//! `http::Response<Bytes>` service and are added through
//! [`HyperConnectorBuilder::layer`](crate::HyperConnectorBuilder::layer).
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use courier::HyperConnector;
//! use courier::middleware::LoggingLayer;
//!
//! let connector = HyperConnector::builder()
//!     .layer(LoggingLayer::new())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
