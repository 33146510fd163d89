//! Body serialization utilities.

use std::io::Read;

use bytes::Bytes;

use crate::{Error, Result};

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use courier_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Server { name: String }
///
/// let server = Server { name: "web-1".to_string() };
/// let bytes = to_json(&server).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"web-1"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error message names the exact field
/// that failed (e.g. `server.addresses.private`).
///
/// # Errors
///
/// Returns [`Error::Decode`] if JSON deserialization fails.
///
/// # Example
///
/// ```
/// use courier_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Server { name: String }
///
/// let server: Server = from_json(br#"{"name":"web-1"}"#).expect("deserialize");
/// assert_eq!(server, Server { name: "web-1".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    from_json_reader(bytes)
}

/// Deserialize JSON from a reader, consuming it to the end.
///
/// Trailing non-whitespace content is rejected.
///
/// # Errors
///
/// Returns [`Error::Decode`] if reading or deserialization fails.
pub fn from_json_reader<T, R>(reader: R) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    R: Read,
{
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(path_error)?;
    deserializer.end()?;
    Ok(value)
}

fn path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Error {
    let path = err.path().to_string();
    let message = if path == "." {
        err.inner().to_string()
    } else {
        format!("{} at '{path}'", err.inner())
    };
    Error::decode(message, Some(Box::new(err.into_inner())))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct Flavor {
            name: String,
            vcpus: u32,
        }

        let flavor = Flavor {
            name: "m1.small".to_string(),
            vcpus: 1,
        };

        let bytes = to_json(&flavor).expect("serialize");
        check!(bytes.as_ref() == br#"{"name":"m1.small","vcpus":1}"#);
    }

    #[test]
    fn from_json_deserialize() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Flavor {
            name: String,
            vcpus: u32,
        }

        let flavor: Flavor = from_json(br#"{"name":"m1.small","vcpus":1}"#).expect("deserialize");
        check!(
            flavor
                == Flavor {
                    name: "m1.small".to_string(),
                    vcpus: 1,
                }
        );
    }

    #[test]
    fn from_json_syntax_error() {
        let result: Result<serde_json::Value> = from_json(b"not json");
        let_assert!(Err(err) = result);
        check!(err.is_decode());
        check!(err.status() == 0);
    }

    #[test]
    fn from_json_trailing_content() {
        let result: Result<serde_json::Value> = from_json(br#"{"a":1} trailing"#);
        check!(result.is_err());
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Addresses {
            #[allow(dead_code)]
            private: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Server {
            #[allow(dead_code)]
            addresses: Addresses,
        }

        let result: Result<Server> = from_json(br#"{"addresses":{}}"#);
        let_assert!(Err(err) = result);
        let msg = err.to_string();
        check!(msg.contains("addresses"), "Expected path 'addresses' in error: {msg}");
        check!(msg.contains("private"), "Expected field 'private' in error: {msg}");
    }

    #[test]
    fn from_json_reader_io_error() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("connection reset"))
            }
        }

        let result: Result<serde_json::Value> = from_json_reader(Broken);
        let_assert!(Err(err) = result);
        check!(err.is_decode());
    }
}
