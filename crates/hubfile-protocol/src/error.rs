//! Error types for the file-upload message layer.
//!
//! Every constructor in this crate either returns a fully validated value
//! or one of these errors. There is no partially-built message to recover.

use std::fmt;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFault {
    /// The field was absent or `null`.
    Missing,
    /// The field was an empty string.
    Empty,
    /// The string holds at least one character that does not encode to a
    /// single UTF-8 byte.
    NonAscii,
}

impl fmt::Display for FieldFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing or null"),
            Self::Empty => write!(f, "empty"),
            Self::NonAscii => write!(f, "contains multi-byte characters"),
        }
    }
}

/// Errors produced while building, parsing, or serializing messages.
///
/// `#[derive(thiserror::Error)]` generates the `std::error::Error` impl;
/// the `#[error(...)]` strings are what shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    /// The payload text is empty or is not a JSON object.
    ///
    /// Type mismatches caught by the decoder (a number where a string was
    /// expected, an integer that overflows) land here too.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A required field is absent, empty, or not single-byte text.
    #[error("invalid field `{field}`: {fault}")]
    InvalidField {
        field: &'static str,
        fault: FieldFault,
    },

    /// A timestamp string does not match its fixed grammar.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Serialization failed (turning a message into JSON text).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),
}

impl SerializerError {
    pub(crate) fn invalid_field(field: &'static str, fault: FieldFault) -> Self {
        Self::InvalidField { field, fault }
    }

    pub(crate) fn invalid_timestamp(
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTimestamp {
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`SerializerError::InvalidField`].
    pub fn is_invalid_field(&self) -> bool {
        matches!(self, Self::InvalidField { .. })
    }

    /// Returns `true` for [`SerializerError::MalformedPayload`].
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, Self::MalformedPayload(_))
    }

    /// Returns `true` for [`SerializerError::InvalidTimestamp`].
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, Self::InvalidTimestamp { .. })
    }
}
