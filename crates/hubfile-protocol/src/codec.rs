//! The JSON mapping shared by every message type.
//!
//! Inbound messages are decoded in two steps: the text is parsed into a
//! private "payload" struct whose fields are all `Option`, then each field
//! goes through [`crate::validate`]. The payload struct never escapes, so a
//! message value only exists once every field has passed.
//!
//! Outbound messages always write every key. None of the wire structs use
//! `skip_serializing_if`, so an absent value would be written as `null`
//! rather than dropped.

use serde::{Serialize, de::DeserializeOwned};

use crate::SerializerError;

/// Wire key names, as they appear in the JSON documents.
pub mod keys {
    pub const DEVICE_ID: &str = "deviceId";
    pub const BLOB_URI: &str = "blobUri";
    pub const BLOB_NAME: &str = "blobName";
    pub const LAST_UPDATED_TIME: &str = "lastUpdatedTime";
    pub const BLOB_SIZE_IN_BYTES: &str = "blobSizeInBytes";
    pub const ENQUEUED_TIME_UTC: &str = "enqueuedTimeUtc";
    pub const CORRELATION_ID: &str = "correlationId";
    pub const HOST_NAME: &str = "hostName";
    pub const CONTAINER_NAME: &str = "containerName";
    pub const SAS_TOKEN: &str = "sasToken";
    pub const IS_SUCCESS: &str = "isSuccess";
    pub const STATUS_CODE: &str = "statusCode";
    pub const STATUS_DESCRIPTION: &str = "statusDescription";
}

/// A message that arrives as JSON text and is validated on the way in.
pub trait Inbound: Sized {
    /// Parses and validates one JSON document.
    ///
    /// # Errors
    /// [`SerializerError::MalformedPayload`] if the text is not a JSON
    /// object, [`SerializerError::InvalidField`] or
    /// [`SerializerError::InvalidTimestamp`] if a field fails its check.
    fn from_json(json: &str) -> Result<Self, SerializerError>;
}

/// A message that leaves as JSON text.
pub trait Outbound {
    /// Serializes the message, writing every key.
    ///
    /// # Errors
    /// [`SerializerError::Encode`] if serde_json refuses the value.
    fn to_json(&self) -> Result<String, SerializerError>;
}

/// Parses `json` into a raw payload struct.
///
/// Only the shape is checked here. Field contents are the caller's job.
pub(crate) fn decode_payload<T: DeserializeOwned>(
    json: &str,
) -> Result<T, SerializerError> {
    if json.trim().is_empty() {
        return Err(malformed("payload is empty"));
    }

    // Going through `Value` first lets us tell "not JSON" apart from
    // "JSON, but not an object" in the error message.
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("expected a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

/// Serializes a wire struct to compact JSON text.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String, SerializerError> {
    serde_json::to_string(value).map_err(SerializerError::Encode)
}

fn malformed(reason: impl Into<String>) -> SerializerError {
    let reason = reason.into();
    tracing::debug!(%reason, "payload rejected");
    SerializerError::MalformedPayload(reason)
}
