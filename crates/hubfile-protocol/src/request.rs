//! Device → hub: "I want to upload a file with this name."

use serde::Serialize;

use crate::SerializerError;
use crate::codec::{self, Outbound, keys};
use crate::validate::validate_restricted_utf8;

/// Asks the hub for storage credentials for one blob.
///
/// Always outbound, so there is no `from_json`. Serializes to
/// `{"blobName":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadRequest {
    blob_name: String,
}

impl FileUploadRequest {
    /// Builds a request for `blob_name`.
    ///
    /// # Errors
    /// [`SerializerError::InvalidField`] if the name is empty or contains a
    /// multi-byte character.
    pub fn new(blob_name: &str) -> Result<Self, SerializerError> {
        let blob_name = validate_restricted_utf8(keys::BLOB_NAME, Some(blob_name))?;
        Ok(Self {
            blob_name: blob_name.to_owned(),
        })
    }

    pub fn blob_name(&self) -> &str {
        &self.blob_name
    }
}

impl Outbound for FileUploadRequest {
    fn to_json(&self) -> Result<String, SerializerError> {
        codec::encode(self)
    }
}
