//! Multi-backend HTTP client with one response contract.
//!
//! Whatever HTTP library performs the exchange, responses are wrapped in a
//! [`ResponseAdapter`] and read through [`HttpResponse`]: failing statuses
//! become typed errors carrying the server's message, 404 on a collection
//! becomes an empty collection, and success bodies decode into the requested
//! type.
//!
//! This crate ships [`HyperConnector`]; the transport-independent pieces live
//! in `courier-core` and are re-exported here.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Default, Deserialize)]
//! pub struct Servers {
//!     servers: Vec<Server>,
//! }
//!
//! let connector = HyperConnector::builder().with_logging().build();
//! let request = http::Request::get("https://compute.example.com/v2.1/servers")
//!     .body(bytes::Bytes::new())?;
//!
//! let mut response = connector.execute(request).await?;
//! match response.entity::<JsonList<Servers>>() {
//!     Ok(servers) => println!("{} servers", servers.servers.len()),
//!     Err(Error::Authentication { .. }) => refresh_token().await?,
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;

pub use client::{BoxedService, HyperConnector, HyperConnectorBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use connector::https_connector;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    BodyStream, BoxError, BufferedResponse, Connector, ConnectorExt, DecodeTarget, Error,
    HttpResponse, Json, JsonList, NativeResponse, NoContent, Raw, ReasonPhrase, ResponseAdapter,
    Result, StatusCategory, TargetKind, Text, canonical_reason, classify, extract_message,
    from_json, from_json_reader, to_json,
};

// Re-export http types for status codes and headers
pub use courier_core::{StatusCode, header};

// Re-export for request construction
pub use http;
