use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    #[error("invalid endpoint url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("malformed response body")]
    Parse,
    #[error("network error")]
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Processing state label as the backend serializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    Processing,
    Completed,
    Failed,
}

/// Body of `GET /api/document-status/{id}`. The backend also echoes the
/// numeric id; nothing here needs it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentStatusPayload {
    pub filename: String,
    pub status: StatusLabel,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `GET /api/system-stats`. Older backends omit `total_queries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct SystemStatsPayload {
    pub total_documents: u64,
    pub processed_documents: u64,
    pub processing_documents: u64,
    pub failed_documents: u64,
    #[serde(default)]
    pub total_queries: u64,
}
