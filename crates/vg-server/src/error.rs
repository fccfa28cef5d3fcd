//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`vg_core::Error`] so that route handlers
//! can return `Result<T, AppError>` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: vg_core::Error,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(inner: vg_core::Error) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }

    pub fn inner(&self) -> &vg_core::Error {
        &self.inner
    }
}

impl From<vg_core::Error> for AppError {
    fn from(e: vg_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                request_id = self.request_id.as_deref().unwrap_or("-"),
                "Server error in API handler"
            );
        }

        let body = match &self.inner {
            // Browser players key off this exact shape.
            vg_core::Error::InvalidIdentifier { .. } => json!({
                "error": "Invalid video ID",
                "message": "Video ID must be a valid number",
                "example": "Use /video/1",
                "code": self.inner.code(),
                "request_id": self.request_id,
            }),
            _ => json!({
                "error": self.inner.to_string(),
                "code": self.inner.code(),
                "request_id": self.request_id,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}
