//! Device → hub: "the upload for this correlation id finished like so."
//!
//! Unlike the other messages, a status report is mutable. A device builds
//! one when the upload starts, then calls [`FileUploadStatus::update`] with
//! the outcome. The correlation id is fixed at construction; the outcome
//! triple is replaced as a unit.
//!
//! ```text
//! correlationId   set once in `new`, never changes
//! ┌───────────────────────────┐
//! │ isSuccess                 │
//! │ statusCode                │ ← replaced together by `update`,
//! │ statusDescription         │   under one lock
//! └───────────────────────────┘
//! ```

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::SerializerError;
use crate::codec::{self, Inbound, Outbound, keys};
use crate::validate::{validate_boolean, validate_integer, validate_restricted_utf8};

/// The three fields of a status report that [`FileUploadStatus::update`]
/// replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOutcome {
    pub is_success: bool,
    pub status_code: i32,
    pub status_description: String,
}

impl StatusOutcome {
    /// Validates all three values before anything is built, so a failure
    /// leaves the caller's current outcome untouched.
    fn validated(
        is_success: Option<bool>,
        status_code: Option<i32>,
        status_description: Option<&str>,
    ) -> Result<Self, SerializerError> {
        let is_success = validate_boolean(keys::IS_SUCCESS, is_success)?;
        let status_code = validate_integer(keys::STATUS_CODE, status_code)?;
        let status_description =
            validate_restricted_utf8(keys::STATUS_DESCRIPTION, status_description)?;
        Ok(Self {
            is_success,
            status_code,
            status_description: status_description.to_owned(),
        })
    }
}

/// Status report for one uploaded file.
///
/// `update` and `to_json` take `&self` and serialize through an internal
/// mutex, so one status can be shared between threads (e.g. behind an
/// `Arc`). A `to_json` call never sees half of one update and half of
/// another.
#[derive(Debug)]
pub struct FileUploadStatus {
    correlation_id: String,
    outcome: Mutex<StatusOutcome>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusWire<'a> {
    correlation_id: &'a str,
    is_success: bool,
    status_code: i32,
    status_description: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusPayload {
    correlation_id: Option<String>,
    is_success: Option<bool>,
    status_code: Option<i32>,
    status_description: Option<String>,
}

impl FileUploadStatus {
    /// Builds a status report.
    ///
    /// Every argument accepts either a plain value or an `Option`, so a
    /// caller holding possibly-absent data can pass it through unchanged:
    ///
    /// ```rust
    /// use hubfile_protocol::FileUploadStatus;
    ///
    /// let status = FileUploadStatus::new("id1", true, 200, "ok").unwrap();
    /// assert_eq!(status.correlation_id(), "id1");
    ///
    /// let missing: Option<i32> = None;
    /// assert!(FileUploadStatus::new("id1", true, missing, "ok").is_err());
    /// ```
    ///
    /// # Errors
    /// [`SerializerError::InvalidField`] if any argument is absent, or a
    /// string is empty or contains a multi-byte character.
    pub fn new<'a>(
        correlation_id: impl Into<Option<&'a str>>,
        is_success: impl Into<Option<bool>>,
        status_code: impl Into<Option<i32>>,
        status_description: impl Into<Option<&'a str>>,
    ) -> Result<Self, SerializerError> {
        let correlation_id =
            validate_restricted_utf8(keys::CORRELATION_ID, correlation_id.into())?;
        let outcome = StatusOutcome::validated(
            is_success.into(),
            status_code.into(),
            status_description.into(),
        )?;

        Ok(Self {
            correlation_id: correlation_id.to_owned(),
            outcome: Mutex::new(outcome),
        })
    }

    /// Replaces the outcome triple and returns the new JSON document.
    ///
    /// All three values are validated before the lock is taken. On any
    /// failure the previous outcome is left exactly as it was.
    ///
    /// # Errors
    /// [`SerializerError::InvalidField`] for an absent or invalid argument.
    pub fn update<'a>(
        &self,
        is_success: impl Into<Option<bool>>,
        status_code: impl Into<Option<i32>>,
        status_description: impl Into<Option<&'a str>>,
    ) -> Result<String, SerializerError> {
        let next = StatusOutcome::validated(
            is_success.into(),
            status_code.into(),
            status_description.into(),
        )?;

        let mut outcome = self.outcome.lock();
        let json = self.encode(&next)?;
        *outcome = next;

        tracing::trace!(
            correlation_id = %self.correlation_id,
            is_success = outcome.is_success,
            status_code = outcome.status_code,
            "upload status updated"
        );
        Ok(json)
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn is_success(&self) -> bool {
        self.outcome.lock().is_success
    }

    pub fn status_code(&self) -> i32 {
        self.outcome.lock().status_code
    }

    pub fn status_description(&self) -> String {
        self.outcome.lock().status_description.clone()
    }

    /// Copies the outcome triple under a single lock.
    pub fn snapshot(&self) -> StatusOutcome {
        self.outcome.lock().clone()
    }

    fn encode(&self, outcome: &StatusOutcome) -> Result<String, SerializerError> {
        codec::encode(&StatusWire {
            correlation_id: &self.correlation_id,
            is_success: outcome.is_success,
            status_code: outcome.status_code,
            status_description: &outcome.status_description,
        })
    }
}

impl Outbound for FileUploadStatus {
    fn to_json(&self) -> Result<String, SerializerError> {
        let outcome = self.outcome.lock();
        self.encode(&outcome)
    }
}

impl Inbound for FileUploadStatus {
    fn from_json(json: &str) -> Result<Self, SerializerError> {
        let raw: StatusPayload = codec::decode_payload(json)?;
        Self::new(
            raw.correlation_id.as_deref(),
            raw.is_success,
            raw.status_code,
            raw.status_description.as_deref(),
        )
    }
}
