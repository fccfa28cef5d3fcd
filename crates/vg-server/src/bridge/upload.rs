//! Upload bridge: chunked file → client-streaming `UploadVideo` call.
//!
//! The chunk sequence is pulled lazily by the transport, so at most one chunk
//! is in flight between the chunker and the request stream. The request
//! stream ends right after the first chunk flagged `is_last`.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use futures::future;
use futures::stream::{self, StreamExt};
use tracing::Instrument;

use vg_core::{chunks_of, Chunk, Error, Result};
use vg_rpc::proto::{self, UploadVideoResponse};
use vg_rpc::VideoBackend;

/// A file received from an HTTP upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name, `"unknown"` when the client sent none.
    pub title: String,
    pub data: Bytes,
}

/// Chunk `file` and upload it.
///
/// Fails with [`Error::InvalidInput`] before any stream is opened when no
/// file was supplied.
pub async fn upload_file(
    backend: &dyn VideoBackend,
    file: Option<UploadedFile>,
    chunk_size: usize,
) -> Result<UploadVideoResponse> {
    let file = file.ok_or_else(|| Error::InvalidInput("No file uploaded".into()))?;

    let chunks = chunks_of(file.data, file.title, chunk_size)?;
    let span = tracing::info_span!(
        "upload",
        title = %chunks.title(),
        size = chunks.total_bytes(),
        expected_chunks = chunks.expected_chunks(),
    );

    upload(backend, chunks).instrument(span).await
}

/// Counters shared between the outbound stream and the awaiting caller.
#[derive(Debug, Default)]
struct Progress {
    chunks: AtomicU32,
    bytes: AtomicU64,
}

impl Progress {
    fn record(&self, chunk: &Chunk) {
        self.chunks.fetch_add(1, Ordering::Relaxed);
        self.bytes
            .fetch_add(chunk.data.len() as u64, Ordering::Relaxed);
    }

    fn chunks(&self) -> u32 {
        self.chunks.load(Ordering::Relaxed)
    }

    fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

/// Feed `chunks` into one `UploadVideo` call and await its acknowledgment.
///
/// Chunks are forwarded in iteration order. Anything after the first
/// `is_last` chunk is not sent. A backend error at any point fails the whole
/// upload with [`Error::UploadFailed`]; there is no partial retry.
pub async fn upload<I>(backend: &dyn VideoBackend, chunks: I) -> Result<UploadVideoResponse>
where
    I: IntoIterator<Item = Chunk>,
    I::IntoIter: Send + 'static,
{
    let progress = Arc::new(Progress::default());
    let sent = Arc::clone(&progress);

    let outbound = stream::iter(chunks)
        .scan(false, |ended, chunk| {
            if *ended {
                return future::ready(None);
            }
            *ended = chunk.is_last;
            future::ready(Some(chunk))
        })
        .map(move |chunk| {
            sent.record(&chunk);
            tracing::trace!(
                chunk_number = chunk.chunk_number,
                size = chunk.data.len(),
                is_last = chunk.is_last,
                "Chunk sent"
            );
            proto::Chunk::from(chunk)
        })
        .boxed();

    tracing::debug!("Opening upload stream");

    match backend.upload_video(outbound).await {
        Ok(ack) => {
            tracing::info!(
                chunks = progress.chunks(),
                bytes = progress.bytes(),
                video_id = ack.video_id,
                "Upload acknowledged"
            );
            Ok(ack)
        }
        Err(status) => {
            tracing::warn!(
                chunks_sent = progress.chunks(),
                error = %status,
                "Upload stream failed"
            );
            Err(Error::upload_failed(status))
        }
    }
}
