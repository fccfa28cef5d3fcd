//! Video upload and playback routes.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use axum::{Extension, Json};

use vg_core::Error;
use vg_rpc::proto::UploadVideoResponse;

use crate::bridge::{self, UploadedFile};
use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// Multipart field carrying the video.
pub const FILE_FIELD: &str = "file";

/// POST /video/upload
pub async fn upload_video(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadVideoResponse>, AppError> {
    let fail = |e: Error| AppError::from(e).with_request_id(request_id.0.clone());

    let multipart = multipart.map_err(|e| fail(Error::InvalidInput(e.body_text())))?;
    let file = read_file_field(multipart).await.map_err(fail)?;

    let chunk_size = ctx.config.upload.effective_chunk_size();
    let ack = bridge::upload_file(ctx.video.as_ref(), file, chunk_size)
        .await
        .map_err(fail)?;

    Ok(Json(ack))
}

/// Pull the first `file` field out of the form, skipping any others.
async fn read_file_field(mut multipart: Multipart) -> vg_core::Result<Option<UploadedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Malformed multipart body", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let title = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or("unknown")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read upload", e))?;

        return Ok(Some(UploadedFile { title, data }));
    }

    Ok(None)
}

/// Keep the body-limit rejection distinct from a malformed form.
fn multipart_error(context: &str, err: MultipartError) -> Error {
    let message = format!("{context}: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(message)
    } else {
        Error::InvalidInput(message)
    }
}

/// GET /video/{id}
///
/// The id is validated before any backend call is made.
pub async fn stream_video(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let fail = |e: Error| AppError::from(e).with_request_id(request_id.0.clone());

    let video_id = bridge::parse_video_id(&id).map_err(fail)?;
    let buffer = bridge::fetch(ctx.video.as_ref(), video_id)
        .await
        .map_err(fail)?;

    let range = headers.get(header::RANGE).and_then(|v| v.to_str().ok());
    Ok(bridge::serve(buffer, range))
}
