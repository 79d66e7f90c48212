//! Docwatch backend: HTTP status client and upload pre-checks.
mod api;
mod client;
mod types;
mod upload;

pub use api::{ApiSettings, ReqwestStatusApi, StatusApi};
pub use client::{ClientEvent, ClientHandle};
pub use types::{ApiError, ApiFailure, DocumentStatusPayload, StatusLabel, SystemStatsPayload};
pub use upload::{
    file_extension, file_kind, format_file_size, FileKind, UploadPolicy, UploadViolation,
    MAX_FILE_SIZE,
};
