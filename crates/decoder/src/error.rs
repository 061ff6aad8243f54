//! Error types for event decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a schema or decoding an event.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The schema file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema is not valid JSON or does not match the expected shape.
    #[error("invalid schema: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema is well formed but inconsistent.
    #[error("schema error: {0}")]
    Schema(String),

    /// A `defined` type refers to a name the schema does not declare.
    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// The payload ended before the layout was fully read.
    #[error("payload truncated: needed {needed} bytes at offset {offset}, {remaining} left")]
    Truncated {
        /// Bytes the next read required.
        needed: usize,
        /// Read position.
        offset: usize,
        /// Bytes left after `offset`.
        remaining: usize,
    },

    /// Payload bytes do not form a valid value.
    #[error("invalid payload: {0}")]
    InvalidData(String),

    /// A field the output format needs is absent or has the wrong shape.
    #[error("event field `{field}` is missing or malformed")]
    MissingField {
        /// Field name.
        field: String,
    },
}

impl DecodeError {
    /// Create a schema error.
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema(message.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData(message.into())
    }

    /// Create a missing field error.
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
