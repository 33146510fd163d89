//! The uniform response contract.
//!
//! [`HttpResponse`] is what callers program against, whatever connector
//! produced the response. The `entity` family is provided once here and
//! shared by every implementation:
//!
//! 1. classify the status;
//! 2. 404 gives the target's empty/absent value;
//! 3. 401 and other 4xx fail with the server's `"message"` when one can be
//!    extracted, every other failing status fails with the reason phrase;
//! 4. success runs the custom decoder if given, else decodes the body.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    BodyStream, DecodeTarget, Error, Result, StatusCategory, classify, extract_message,
};

/// Uniform view over an HTTP response.
pub trait HttpResponse {
    /// HTTP status code.
    fn status(&self) -> u16;

    /// Reason phrase, possibly empty.
    fn reason(&self) -> String;

    /// First value of a header, looked up case-insensitively.
    fn header(&self, name: &str) -> Option<String>;

    /// All headers; the first occurrence wins for repeated names.
    fn headers(&self) -> HashMap<String, String>;

    /// Take the raw, undecoded body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyConsumed`] if the body was already taken.
    fn input_stream(&mut self) -> Result<BodyStream>;

    /// Decode the body into `T`, mapping failing statuses to typed errors.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`], [`Error::ClientRequest`],
    ///   [`Error::ServerResponse`] or [`Error::Response`] for failing statuses
    /// - [`Error::Decode`] if a success body cannot be decoded
    fn entity<T: DecodeTarget>(&mut self) -> Result<T::Output>
    where
        Self: Sized,
    {
        resolve_entity::<Self, T, fn(&mut Self) -> Result<T::Output>>(self, None)
    }

    /// Like [`entity`](Self::entity), but a success response is handed to
    /// `decoder` instead of the target's own decoding.
    ///
    /// Status handling happens before `decoder` runs, so it only ever sees
    /// success responses.
    ///
    /// # Errors
    ///
    /// Same as [`entity`](Self::entity), plus whatever `decoder` returns.
    fn entity_with<T, F>(&mut self, decoder: F) -> Result<T::Output>
    where
        Self: Sized,
        T: DecodeTarget,
        F: FnOnce(&mut Self) -> Result<T::Output>,
    {
        resolve_entity::<Self, T, F>(self, Some(decoder))
    }

    /// Decode the body into `T` without looking at the status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body cannot be decoded, or
    /// [`Error::BodyConsumed`] if it was already taken.
    fn read_entity<T: DecodeTarget>(&mut self) -> Result<T::Output>
    where
        Self: Sized,
    {
        if let Some(value) = T::without_body() {
            return Ok(value);
        }
        T::decode(self.input_stream()?)
    }
}

fn resolve_entity<R, T, F>(response: &mut R, decoder: Option<F>) -> Result<T::Output>
where
    R: HttpResponse,
    T: DecodeTarget,
    F: FnOnce(&mut R) -> Result<T::Output>,
{
    let status = response.status();
    let category = classify(status);
    trace!(status, %category, target = %T::KIND, "resolving entity");

    match category {
        StatusCategory::Success => {
            if let Some(decoder) = decoder {
                return decoder(response);
            }
            if let Some(value) = T::without_body() {
                return Ok(value);
            }
            T::decode(response.input_stream()?).inspect_err(|err| {
                debug!(status, error = %err, "failed to decode response body");
            })
        }
        StatusCategory::NotFound => Ok(T::not_found()),
        StatusCategory::Unauthorized
        | StatusCategory::ClientError
        | StatusCategory::ServerError
        | StatusCategory::Unclassified => Err(status_error(response, status, category)),
    }
}

fn status_error<R: HttpResponse>(response: &mut R, status: u16, category: StatusCategory) -> Error {
    let message = if category.carries_message() {
        server_message(response)
    } else {
        None
    };
    let message = message.unwrap_or_else(|| response.reason());
    Error::from_status(message, status, None)
}

fn server_message<R: HttpResponse>(response: &mut R) -> Option<String> {
    let body = response
        .input_stream()
        .and_then(BodyStream::into_bytes)
        .inspect_err(|err| debug!(error = %err, "error body unavailable, using reason phrase"))
        .ok()?;

    let message = extract_message(&body);
    if message.is_none() {
        trace!(body_len = body.len(), "no server message in error body");
    }
    message
}
