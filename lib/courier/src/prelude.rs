//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    ClientConfig, Connector, ConnectorExt, DecodeTarget, Error, HttpResponse, HyperConnector, Json,
    JsonList, NoContent, ResponseAdapter, Result, StatusCategory, StatusCode, Text, classify,
    header,
};
pub use serde::{Deserialize, Serialize};
