//! Hub → service: "a device finished uploading this blob."

use serde::Deserialize;

use crate::SerializerError;
use crate::codec::{self, Inbound, keys};
use crate::timestamp::{Instant, parse_offset_timestamp, parse_utc_timestamp};
use crate::validate::{validate_integer, validate_restricted_utf8};

/// Notification that one file upload completed.
///
/// ```json
/// {
///     "deviceId": "mydevice",
///     "blobUri": "https://account.blob.core.windows.net/container/mydevice/myfile.jpg",
///     "blobName": "mydevice/myfile.jpg",
///     "lastUpdatedTime": "2016-06-01T21:22:41+00:00",
///     "blobSizeInBytes": 1234,
///     "enqueuedTimeUtc": "2016-06-01T21:22:43.7996883Z"
/// }
/// ```
///
/// Both time strings are kept as received, alongside the instants parsed
/// from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadNotification {
    device_id: String,
    blob_uri: String,
    blob_name: String,
    last_updated_time: String,
    last_updated_instant: Instant,
    blob_size_in_bytes: i64,
    enqueued_time_utc: String,
    enqueued_instant: Instant,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationPayload {
    device_id: Option<String>,
    blob_uri: Option<String>,
    blob_name: Option<String>,
    last_updated_time: Option<String>,
    blob_size_in_bytes: Option<i64>,
    enqueued_time_utc: Option<String>,
}

impl FileUploadNotification {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn blob_uri(&self) -> &str {
        &self.blob_uri
    }

    pub fn blob_name(&self) -> &str {
        &self.blob_name
    }

    pub fn blob_size_in_bytes(&self) -> i64 {
        self.blob_size_in_bytes
    }

    /// When the blob was last written, normalized to UTC.
    pub fn last_updated_time(&self) -> Instant {
        self.last_updated_instant
    }

    /// `lastUpdatedTime` exactly as received.
    pub fn last_updated_time_raw(&self) -> &str {
        &self.last_updated_time
    }

    /// When the hub queued the notification.
    pub fn enqueued_time_utc(&self) -> Instant {
        self.enqueued_instant
    }

    /// `enqueuedTimeUtc` exactly as received.
    pub fn enqueued_time_utc_raw(&self) -> &str {
        &self.enqueued_time_utc
    }
}

impl Inbound for FileUploadNotification {
    fn from_json(json: &str) -> Result<Self, SerializerError> {
        let raw: NotificationPayload = codec::decode_payload(json)?;

        let device_id = validate_restricted_utf8(keys::DEVICE_ID, raw.device_id.as_deref())?;
        let blob_uri = validate_restricted_utf8(keys::BLOB_URI, raw.blob_uri.as_deref())?;
        let blob_name = validate_restricted_utf8(keys::BLOB_NAME, raw.blob_name.as_deref())?;
        let enqueued_time_utc =
            validate_restricted_utf8(keys::ENQUEUED_TIME_UTC, raw.enqueued_time_utc.as_deref())?;
        let last_updated_time =
            validate_restricted_utf8(keys::LAST_UPDATED_TIME, raw.last_updated_time.as_deref())?;
        let blob_size_in_bytes = validate_integer(keys::BLOB_SIZE_IN_BYTES, raw.blob_size_in_bytes)?;

        let enqueued_instant = parse_utc_timestamp(enqueued_time_utc)?;
        let last_updated_instant = parse_offset_timestamp(last_updated_time)?;

        tracing::trace!(device_id, blob_name, blob_size_in_bytes, "upload notification accepted");

        Ok(Self {
            device_id: device_id.to_owned(),
            blob_uri: blob_uri.to_owned(),
            blob_name: blob_name.to_owned(),
            last_updated_time: last_updated_time.to_owned(),
            last_updated_instant,
            blob_size_in_bytes,
            enqueued_time_utc: enqueued_time_utc.to_owned(),
            enqueued_instant,
        })
    }
}
