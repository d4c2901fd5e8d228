//! Error types for the value system and the persistence boundary.

use crate::kind::PropertyType;
use thiserror::Error;

/// Errors produced by property accessors and by the wire codec.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// An accessor was used against a property of a different type,
    /// or against a property whose payload is absent.
    #[error("{name} has type {actual}")]
    TypeMismatch {
        /// Name of the property that was read.
        name: String,
        /// The type the property actually carries.
        actual: PropertyType,
    },

    /// A numeric literal does not fit the declared type.
    #[error("value {literal} out of range for data type {kind}, expected {bound}")]
    OutOfRange {
        /// The literal as the JSON reader reports it. Exponents are
        /// normalized, so `1e20` reads back as `1e+20`.
        literal: String,
        /// The declared destination type.
        kind: PropertyType,
        /// Human-readable inclusive bound, e.g. `[-128, 127]`.
        bound: String,
    },

    /// Converting text (or a non-integral literal) into a scalar failed.
    #[error("cannot parse {input:?} as {kind}: {message}")]
    Parse {
        /// The destination type.
        kind: PropertyType,
        /// The text that failed to parse.
        input: String,
        /// Message from the underlying parser.
        message: String,
    },

    /// The serialized data is not well-formed under the wire grammar.
    #[error("malformed wire data: {0}")]
    MalformedWire(String),

    /// Serializing a property failed.
    #[error("encode failed: {0}")]
    Encode(String),

    /// A type code outside the registry.
    #[error("unknown property type code {0}")]
    UnknownCode(u8),

    /// A type label outside the registry.
    #[error("unknown property type label {0:?}")]
    UnknownLabel(String),

    /// The requested property does not exist.
    #[error("property does not exist: {0}")]
    NotFound(String),

    /// A null column was handed to [`Properties::scan`](crate::Properties::scan).
    #[error("cannot scan null into Properties")]
    NullColumn,
}

impl PropertyError {
    pub(crate) fn malformed(message: impl std::fmt::Display) -> Self {
        Self::MalformedWire(message.to_string())
    }

    pub(crate) fn parse(
        kind: PropertyType,
        input: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Parse {
            kind,
            input: input.into(),
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for PropertyError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedWire(err.to_string())
    }
}

/// Errors from a [`PropertyStore`](crate::PropertyStore) backend.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading from the backend failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// Writing to the backend failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Stored bytes could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] PropertyError),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
