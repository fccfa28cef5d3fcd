//! Download bridge: server-streaming `StreamVideo` call → byte-range response.
//!
//! The whole chunk stream is assembled before anything is written to the
//! HTTP caller, because the total length must be known to resolve a range.
//! A stream error therefore never leaves a half-sent response behind.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use vg_core::{resolve, Error, ResolvedRange, Result};
use vg_rpc::proto::StreamVideoRequest;
use vg_rpc::VideoBackend;

/// Content type of every served video.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Parse a path segment as a video id (base-10 `i32`).
pub fn parse_video_id(raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| Error::invalid_identifier(raw))
}

/// Tracks one download so an abandoned stream is visible in the logs.
///
/// When the HTTP client disconnects, axum drops the handler future; that
/// drops the tonic stream (cancelling the call) and this guard with it.
struct StreamGuard {
    video_id: i32,
    chunks: u32,
    bytes: usize,
    finished: bool,
}

impl StreamGuard {
    fn new(video_id: i32) -> Self {
        Self {
            video_id,
            chunks: 0,
            bytes: 0,
            finished: false,
        }
    }

    fn record(&mut self, len: usize) {
        self.chunks += 1;
        self.bytes += len;
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        if !self.finished {
            tracing::info!(
                video_id = self.video_id,
                chunks_received = self.chunks,
                bytes_received = self.bytes,
                "Download cancelled before the stream completed"
            );
        }
    }
}

/// Consume the full chunk stream for `video_id` into one contiguous buffer.
///
/// Chunk payloads are appended in arrival order. Any stream error discards
/// what was received so far and fails with [`Error::StreamFailed`].
pub async fn fetch(backend: &dyn VideoBackend, video_id: i32) -> Result<Bytes> {
    let mut guard = StreamGuard::new(video_id);

    tracing::debug!(video_id, "Opening video stream");
    let mut stream = match backend.stream_video(StreamVideoRequest { video_id }).await {
        Ok(stream) => stream,
        Err(status) => {
            guard.finish();
            tracing::warn!(video_id, error = %status, "Video stream could not be opened");
            return Err(Error::stream_failed(status));
        }
    };

    let mut buffer = BytesMut::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => {
                guard.record(chunk.data.len());
                tracing::trace!(
                    video_id,
                    chunk_number = chunk.chunk_number,
                    size = chunk.data.len(),
                    "Chunk received"
                );
                buffer.extend_from_slice(&chunk.data);
            }
            Err(status) => {
                guard.finish();
                tracing::warn!(
                    video_id,
                    chunks_received = guard.chunks,
                    error = %status,
                    "Video stream failed"
                );
                return Err(Error::stream_failed(status));
            }
        }
    }

    guard.finish();
    tracing::debug!(
        video_id,
        chunks = guard.chunks,
        bytes = buffer.len(),
        "Video stream completed"
    );

    Ok(buffer.freeze())
}

/// Build the HTTP response for `buffer` honoring an optional `Range` header.
pub fn serve(buffer: Bytes, range_header: Option<&str>) -> Response {
    let range = resolve(range_header, buffer.len() as u64);

    match range {
        ResolvedRange::Full { total } => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, VIDEO_CONTENT_TYPE.to_string()),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CONTENT_LENGTH, total.to_string()),
            ],
            buffer,
        )
            .into_response(),
        ResolvedRange::Partial { start, end, total } => {
            let body = buffer.slice(start as usize..=end as usize);
            (
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::CONTENT_TYPE, VIDEO_CONTENT_TYPE.to_string()),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                    (header::CONTENT_RANGE, format!("bytes {start}-{end}/{total}")),
                    (header::CONTENT_LENGTH, range.content_length().to_string()),
                ],
                body,
            )
                .into_response()
        }
        ResolvedRange::Unsatisfiable { total } => (
            StatusCode::RANGE_NOT_SATISFIABLE,
            [
                (header::CONTENT_RANGE, format!("bytes */{total}")),
                (header::ACCEPT_RANGES, "bytes".to_string()),
            ],
            Body::empty(),
        )
            .into_response(),
    }
}
