//! Primitive field checks shared by every message type.
//!
//! Each validator takes the wire key of the field it is checking so a
//! rejection can say which field was wrong, and hands back the unwrapped
//! value on success:
//!
//! ```rust
//! use hubfile_protocol::validate::validate_restricted_utf8;
//!
//! let name = validate_restricted_utf8("blobName", Some("device1/image.jpg")).unwrap();
//! assert_eq!(name, "device1/image.jpg");
//!
//! assert!(validate_restricted_utf8("blobName", Some("\u{1234}image.jpg")).is_err());
//! ```

use crate::error::{FieldFault, SerializerError};

/// Accepts a string only if it is present, non-empty, and every character
/// encodes to exactly one UTF-8 byte.
///
/// A Rust `&str` is always valid UTF-8, so "one byte per character" is the
/// same as "ASCII only": U+0000 through U+007F pass, anything above fails.
///
/// # Errors
/// [`SerializerError::InvalidField`] with [`FieldFault::Missing`],
/// [`FieldFault::Empty`] or [`FieldFault::NonAscii`].
pub fn validate_restricted_utf8<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, SerializerError> {
    let fault = match value {
        None => FieldFault::Missing,
        Some("") => FieldFault::Empty,
        Some(s) if !s.is_ascii() => FieldFault::NonAscii,
        Some(s) => return Ok(s),
    };
    tracing::debug!(field, %fault, "string field rejected");
    Err(SerializerError::invalid_field(field, fault))
}

/// Accepts any present integer. There is no range check.
///
/// # Errors
/// [`SerializerError::InvalidField`] with [`FieldFault::Missing`].
pub fn validate_integer<T>(
    field: &'static str,
    value: Option<T>,
) -> Result<T, SerializerError> {
    value.ok_or_else(|| missing(field))
}

/// Accepts any present boolean.
///
/// # Errors
/// [`SerializerError::InvalidField`] with [`FieldFault::Missing`].
pub fn validate_boolean(
    field: &'static str,
    value: Option<bool>,
) -> Result<bool, SerializerError> {
    value.ok_or_else(|| missing(field))
}

fn missing(field: &'static str) -> SerializerError {
    tracing::debug!(field, "required field missing");
    SerializerError::invalid_field(field, FieldFault::Missing)
}
