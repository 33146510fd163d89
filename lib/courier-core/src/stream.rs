//! Single-read response body stream.

use std::fmt;
use std::io::{self, Read};

use bytes::{Buf, Bytes};

use crate::{Error, Result};

/// Raw, undecoded response body.
///
/// A `BodyStream` is handed out at most once per response; reading it is the
/// caller's business from then on.
pub struct BodyStream {
    inner: Box<dyn Read + Send>,
}

impl BodyStream {
    /// Stream over an in-memory buffer.
    #[must_use]
    pub fn from_bytes(bytes: Bytes) -> Self {
        Self::from_reader(bytes.reader())
    }

    /// Stream over any reader.
    #[must_use]
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            inner: Box::new(reader),
        }
    }

    /// Empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    /// Read the remaining body into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the underlying reader fails.
    pub fn into_bytes(mut self) -> Result<Bytes> {
        let mut buf = Vec::new();
        self.inner
            .read_to_end(&mut buf)
            .map_err(|err| Error::decode(format!("failed to read body: {err}"), Some(Box::new(err))))?;
        Ok(Bytes::from(buf))
    }

    /// Read the remaining body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if reading fails or the body is not UTF-8.
    pub fn into_text(self) -> Result<String> {
        let bytes = self.into_bytes()?;
        String::from_utf8(bytes.to_vec())
            .map_err(|err| Error::decode("body is not valid UTF-8", Some(Box::new(err))))
    }
}

impl Read for BodyStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream").finish_non_exhaustive()
    }
}

impl From<Bytes> for BodyStream {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}
