//! Error types for the fintech API client.
//!
//! # Design
//! Two kinds matter to callers: the request never completed (`Transport`),
//! or it completed with a non-2xx status (`Status`). The API does not
//! distinguish 4xx from 5xx here; every failing status lands in `Status`
//! with the best diagnostic text available.

/// Errors returned by the fintech client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP round-trip could not complete (DNS, connect, timeout, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200..=299.
    #[error("Fintech API Error ({status}): {message}")]
    Status { status: u16, message: String },

    /// A 2xx body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
