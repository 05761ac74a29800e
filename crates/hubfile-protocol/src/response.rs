//! Hub → device: where to upload, and the credential to do it with.

use serde::Deserialize;

use crate::SerializerError;
use crate::codec::{self, Inbound, keys};
use crate::validate::validate_restricted_utf8;

/// Storage coordinates returned by the hub for one upload.
///
/// Every field is validated independently; the first failure aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadResponse {
    correlation_id: String,
    host_name: String,
    container_name: String,
    blob_name: String,
    sas_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePayload {
    correlation_id: Option<String>,
    host_name: Option<String>,
    container_name: Option<String>,
    blob_name: Option<String>,
    sas_token: Option<String>,
}

impl FileUploadResponse {
    /// Ties this upload to the status report sent when it finishes.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn blob_name(&self) -> &str {
        &self.blob_name
    }

    /// Opaque storage credential.
    pub fn sas_token(&self) -> &str {
        &self.sas_token
    }
}

impl Inbound for FileUploadResponse {
    fn from_json(json: &str) -> Result<Self, SerializerError> {
        let raw: ResponsePayload = codec::decode_payload(json)?;

        let field = |key, value: &Option<String>| {
            validate_restricted_utf8(key, value.as_deref()).map(str::to_owned)
        };
        let response = Self {
            correlation_id: field(keys::CORRELATION_ID, &raw.correlation_id)?,
            host_name: field(keys::HOST_NAME, &raw.host_name)?,
            container_name: field(keys::CONTAINER_NAME, &raw.container_name)?,
            blob_name: field(keys::BLOB_NAME, &raw.blob_name)?,
            sas_token: field(keys::SAS_TOKEN, &raw.sas_token)?,
        };

        tracing::trace!(correlation_id = %response.correlation_id, "upload response accepted");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid() -> serde_json::Value {
        json!({
            "correlationId": "somecorrelationid",
            "hostName": "contoso.azure-devices.net",
            "containerName": "testcontainer",
            "blobName": "test-device1/image.jpg",
            "sasToken": "1234asdfSAStoken",
        })
    }

    fn rejected_field(doc: &serde_json::Value) -> &'static str {
        match FileUploadResponse::from_json(&doc.to_string()).unwrap_err() {
            SerializerError::InvalidField { field, .. } => field,
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_maps_all_fields() {
        let response = FileUploadResponse::from_json(&valid().to_string()).unwrap();
        assert_eq!(response.correlation_id(), "somecorrelationid");
        assert_eq!(response.host_name(), "contoso.azure-devices.net");
        assert_eq!(response.container_name(), "testcontainer");
        assert_eq!(response.blob_name(), "test-device1/image.jpg");
        assert_eq!(response.sas_token(), "1234asdfSAStoken");
    }

    #[test]
    fn test_each_field_is_checked() {
        for key in [
            keys::CORRELATION_ID,
            keys::HOST_NAME,
            keys::CONTAINER_NAME,
            keys::BLOB_NAME,
            keys::SAS_TOKEN,
        ] {
            for bad in [json!(null), json!(""), json!("bad\u{1234}value")] {
                let mut doc = valid();
                doc[key] = bad;
                assert_eq!(rejected_field(&doc), key);
            }

            let mut doc = valid();
            doc.as_object_mut().unwrap().remove(key);
            assert_eq!(rejected_field(&doc), key);
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let mut doc = valid();
        doc["hostName"] = json!("");
        doc["sasToken"] = json!("");
        assert_eq!(rejected_field(&doc), keys::HOST_NAME);
    }

    #[test]
    fn test_malformed_text_is_rejected() {
        for json in ["", "{&*", "null"] {
            let err = FileUploadResponse::from_json(json).unwrap_err();
            assert!(err.is_malformed_payload());
        }
    }
}
