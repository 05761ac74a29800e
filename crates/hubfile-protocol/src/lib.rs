//! Validating JSON messages for device file uploads.
//!
//! A device uploading a file to blob storage talks to its cloud hub in four
//! messages:
//!
//! ```text
//! device ── FileUploadRequest ──────→ hub        {"blobName": ...}
//! device ←─ FileUploadResponse ────── hub        storage host, container, SAS token
//! device ── FileUploadStatus ───────→ hub        success flag, code, description
//! service ← FileUploadNotification ── hub        blob URI, size, timestamps
//! ```
//!
//! This crate only maps those messages to and from JSON. Every field is
//! checked on the way in, and a message value exists only if all of its
//! fields passed. Transport and storage access belong to the caller.
//!
//! - **Messages** ([`FileUploadNotification`], [`FileUploadRequest`],
//!   [`FileUploadResponse`], [`FileUploadStatus`])
//! - **Codec** ([`Inbound`], [`Outbound`], wire [`keys`])
//! - **Checks** ([`validate`], [`timestamp`])
//! - **Errors** ([`SerializerError`])

mod codec;
mod error;
mod notification;
mod request;
mod response;
mod status;

pub mod timestamp;
pub mod validate;

pub use codec::{Inbound, Outbound, keys};
pub use error::{FieldFault, SerializerError};
pub use notification::FileUploadNotification;
pub use request::FileUploadRequest;
pub use response::FileUploadResponse;
pub use status::{FileUploadStatus, StatusOutcome};
pub use timestamp::Instant;
