//! Error types for the catalog client.
//!
//! # Design
//! Two tiers. `ApiError` is the raw failure shape every HTTP-backed
//! operation reports: the status code, reason phrase and body of a
//! non-success response, or the transport/codec failure that prevented one.
//! `OperationalError` is the normalized record produced only by the
//! book-listing path, carrying a fixed code and a message meant for people.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code carried by every [`OperationalError`] raised while retrieving data.
pub const RETRIEVAL_ERROR_NUMBER: u32 = 100;

/// User-facing text carried by every retrieval [`OperationalError`].
pub const RETRIEVAL_FRIENDLY_MESSAGE: &str = "An error occured retrieving data.";

/// Raw failures returned by `CatalogClient` parse methods and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status the operation does not accept.
    #[error("HTTP {status} {status_text}: {body}")]
    HttpError {
        status: u16,
        status_text: String,
        body: String,
    },

    /// No response was received.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status of the failed exchange, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Normalized failure record: numeric code, raw diagnostic text, and a
/// message suitable for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("error {error_number}: {message}")]
pub struct OperationalError {
    #[serde(rename = "errorNumber")]
    pub error_number: u32,
    pub message: String,
    #[serde(rename = "friendlyMessage")]
    pub friendly_message: String,
}

impl OperationalError {
    /// A retrieval failure with `message` as the diagnostic text.
    pub fn retrieval(message: impl Into<String>) -> Self {
        Self {
            error_number: RETRIEVAL_ERROR_NUMBER,
            message: message.into(),
            friendly_message: RETRIEVAL_FRIENDLY_MESSAGE.to_string(),
        }
    }
}

impl From<ApiError> for OperationalError {
    /// HTTP failures keep only the status text; anything else keeps its
    /// own description since there is no status to report.
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::HttpError { status_text, .. } => Self::retrieval(status_text),
            other => Self::retrieval(other.to_string()),
        }
    }
}
