//! Unified error type for the gateway.
//!
//! Every crate funnels its failures into [`Error`], which carries enough
//! context for HTTP handlers to derive a status code via [`Error::http_status`].

use std::fmt;

/// Boxed cause carried by the bridge failure variants.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type covering all failure modes of the gateway.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request did not carry the input the operation needs (e.g. no
    /// uploaded file).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// A video identifier was not a base-10 integer.
    #[error("Invalid video ID: {value}")]
    InvalidIdentifier {
        /// The raw identifier as received.
        value: String,
    },

    /// The backend rejected or aborted a client-streaming upload.
    #[error("Upload failed: {0}")]
    UploadFailed(#[source] Cause),

    /// The backend aborted a server-streaming download.
    #[error("Stream failed: {0}")]
    StreamFailed(#[source] Cause),

    /// Request data or configuration failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A forwarded backend call returned a non-OK status.
    #[error("Backend error ({status}): {message}")]
    Backend {
        /// HTTP status derived from the backend status code.
        status: u16,
        /// Message reported by the backend.
        message: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidInput(_) => 400,
            Error::PayloadTooLarge(_) => 413,
            Error::InvalidIdentifier { .. } => 400,
            Error::UploadFailed(_) => 502,
            Error::StreamFailed(_) => 502,
            Error::Validation(_) => 400,
            Error::Backend { status, .. } => *status,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::PayloadTooLarge(_) => "payload_too_large",
            Error::InvalidIdentifier { .. } => "invalid_identifier",
            Error::UploadFailed(_) => "upload_failed",
            Error::StreamFailed(_) => "stream_failed",
            Error::Validation(_) => "validation_error",
            Error::Backend { .. } => "backend_error",
            Error::Io { .. } => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Convenience constructor for [`Error::InvalidIdentifier`].
    pub fn invalid_identifier(value: impl fmt::Display) -> Self {
        Error::InvalidIdentifier {
            value: value.to_string(),
        }
    }

    /// Convenience constructor for [`Error::UploadFailed`].
    pub fn upload_failed(cause: impl Into<Cause>) -> Self {
        Error::UploadFailed(cause.into())
    }

    /// Convenience constructor for [`Error::StreamFailed`].
    pub fn stream_failed(cause: impl Into<Cause>) -> Self {
        Error::StreamFailed(cause.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
