//! Decode targets: what a response body should become.
//!
//! A [`DecodeTarget`] is a type-level description passed to
//! [`HttpResponse::entity`](crate::HttpResponse::entity):
//!
//! | Target | Output | On 404 |
//! |--------|--------|--------|
//! | [`Json<T>`] | `Option<T>` | `None` |
//! | [`JsonList<C>`] | `C` | `C::default()` |
//! | [`Text`] | `Option<String>` | `None` |
//! | [`Raw`] | `Option<Bytes>` | `None` |
//! | [`NoContent`] | `()` | `()` |
//!
//! # Example
//!
//! ```ignore
//! let server = response.entity::<Json<Server>>()?;        // Option<Server>
//! let servers = response.entity::<JsonList<Servers>>()?;  // Servers, empty on 404
//! response.entity::<NoContent>()?;
//! ```

use std::marker::PhantomData;

use bytes::Bytes;
use derive_more::Display;
use serde::de::DeserializeOwned;

use crate::{BodyStream, Result, from_json_reader};

/// Shape of a decode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TargetKind {
    /// A single value; absent on 404.
    #[display("object")]
    Object,
    /// A collection; empty on 404.
    #[display("collection")]
    Collection,
    /// No body expected.
    #[display("no content")]
    NoContent,
}

/// Description of the type a response body is decoded into.
pub trait DecodeTarget {
    /// Value handed back to the caller.
    type Output;

    /// Shape of this target.
    const KIND: TargetKind;

    /// Value for a 404 response.
    fn not_found() -> Self::Output;

    /// Value produced without touching the body, if the target expects none.
    fn without_body() -> Option<Self::Output> {
        None
    }

    /// Decode a success body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::Error::Decode) if the body cannot be
    /// read or converted.
    fn decode(body: BodyStream) -> Result<Self::Output>;
}

/// A single JSON value.
#[derive(Debug)]
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned> DecodeTarget for Json<T> {
    type Output = Option<T>;

    const KIND: TargetKind = TargetKind::Object;

    fn not_found() -> Self::Output {
        None
    }

    fn decode(body: BodyStream) -> Result<Self::Output> {
        from_json_reader(body).map(Some)
    }
}

/// A JSON collection, or any envelope around one, that is empty on 404.
///
/// `C` is typically `Vec<T>` or a wrapper such as
/// `struct Servers { servers: Vec<Server> }` deriving `Default`.
#[derive(Debug)]
pub struct JsonList<C>(PhantomData<fn() -> C>);

impl<C: DeserializeOwned + Default> DecodeTarget for JsonList<C> {
    type Output = C;

    const KIND: TargetKind = TargetKind::Collection;

    fn not_found() -> Self::Output {
        C::default()
    }

    fn decode(body: BodyStream) -> Result<Self::Output> {
        from_json_reader(body)
    }
}

/// UTF-8 text.
#[derive(Debug)]
pub struct Text;

impl DecodeTarget for Text {
    type Output = Option<String>;

    const KIND: TargetKind = TargetKind::Object;

    fn not_found() -> Self::Output {
        None
    }

    fn decode(body: BodyStream) -> Result<Self::Output> {
        body.into_text().map(Some)
    }
}

/// Raw bytes.
#[derive(Debug)]
pub struct Raw;

impl DecodeTarget for Raw {
    type Output = Option<Bytes>;

    const KIND: TargetKind = TargetKind::Object;

    fn not_found() -> Self::Output {
        None
    }

    fn decode(body: BodyStream) -> Result<Self::Output> {
        body.into_bytes().map(Some)
    }
}

/// No body expected; the body is left unread.
#[derive(Debug)]
pub struct NoContent;

impl DecodeTarget for NoContent {
    type Output = ();

    const KIND: TargetKind = TargetKind::NoContent;

    fn not_found() -> Self::Output {}

    fn without_body() -> Option<Self::Output> {
        Some(())
    }

    fn decode(_body: BodyStream) -> Result<Self::Output> {
        Ok(())
    }
}
