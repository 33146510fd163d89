//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    BufferedResponse, Connector, ConnectorExt, DecodeTarget, Error, HttpResponse, Json, JsonList,
    NativeResponse, NoContent, ResponseAdapter, Result, StatusCategory, Text, classify,
};
