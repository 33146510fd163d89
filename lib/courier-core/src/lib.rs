//! Core types and traits for the courier multi-backend HTTP client.
//!
//! This crate normalizes already-received responses, whatever HTTP library
//! produced them:
//! - [`classify`] and [`StatusCategory`] - HTTP status classification
//! - [`extract_message`] - best-effort server message extraction
//! - [`DecodeTarget`] with [`Json`], [`JsonList`], [`Text`], [`Raw`], [`NoContent`] - body decoding
//! - [`HttpResponse`] - the uniform response contract
//! - [`ResponseAdapter`] - wraps any [`NativeResponse`] behind [`HttpResponse`]
//! - [`BufferedResponse`] - owned, transport-neutral native response
//! - [`Connector`] - seam for plugging an HTTP library in
//! - [`Error`] and [`Result`] - Error handling
//!
//! # Example
//!
//! ```
//! use courier_core::{BufferedResponse, HttpResponse, JsonList, ResponseAdapter};
//!
//! #[derive(Debug, Default, serde::Deserialize)]
//! struct Servers {
//!     servers: Vec<serde_json::Value>,
//! }
//!
//! let mut response = ResponseAdapter::wrap(BufferedResponse::new(404, bytes::Bytes::new()));
//! let servers = response.entity::<JsonList<Servers>>()?;
//! assert!(servers.servers.is_empty());
//! # Ok::<(), courier_core::Error>(())
//! ```

mod adapter;
mod body;
mod buffered;
mod client;
mod error;
mod message;
mod native;
pub mod prelude;
mod response;
mod status;
mod stream;
mod target;

pub use adapter::ResponseAdapter;
pub use body::{from_json, from_json_reader, to_json};
pub use buffered::BufferedResponse;
pub use client::{Connector, ConnectorExt};
pub use error::{BoxError, Error, Result};
pub use message::extract_message;
pub use native::{NativeResponse, ReasonPhrase, canonical_reason};
pub use response::HttpResponse;
pub use status::{StatusCategory, classify};
pub use stream::BodyStream;
pub use target::{DecodeTarget, Json, JsonList, NoContent, Raw, TargetKind, Text};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
