//! Fixed-size chunking of an uploaded buffer.
//!
//! [`chunks_of`] walks a buffer in strides of `chunk_size` bytes and yields
//! [`Chunk`]s numbered from zero. Chunk payloads are zero-copy slices of the
//! source [`Bytes`], so only the reference count is touched per chunk.

use bytes::Bytes;

use crate::error::{Error, Result};

/// Default chunk size for uploads (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// One ordered fragment of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Original file name of the upload this chunk belongs to.
    pub title: String,
    pub data: Bytes,
    /// Position within the upload, starting at 0.
    pub chunk_number: u32,
    /// True only for the final chunk of the upload.
    pub is_last: bool,
}

/// Split `buffer` into chunks of at most `chunk_size` bytes.
///
/// An empty buffer yields a single empty chunk flagged `is_last`, so every
/// upload carries exactly one terminal chunk.
pub fn chunks_of(buffer: Bytes, title: impl Into<String>, chunk_size: usize) -> Result<Chunks> {
    if chunk_size == 0 {
        return Err(Error::Validation("chunk size must be greater than 0".into()));
    }

    Ok(Chunks {
        buffer,
        title: title.into(),
        chunk_size,
        offset: 0,
        next_number: 0,
        finished: false,
    })
}

/// Lazy iterator over the chunks of one upload.
#[derive(Debug, Clone)]
pub struct Chunks {
    buffer: Bytes,
    title: String,
    chunk_size: usize,
    offset: usize,
    next_number: u32,
    finished: bool,
}

impl Chunks {
    /// Number of chunks the whole upload produces.
    pub fn expected_chunks(&self) -> usize {
        self.buffer.len().div_ceil(self.chunk_size).max(1)
    }

    /// Total size of the buffer being chunked.
    pub fn total_bytes(&self) -> usize {
        self.buffer.len()
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.finished {
            return None;
        }

        let len = self.buffer.len();
        let start = self.offset;
        let end = start.saturating_add(self.chunk_size).min(len);
        let is_last = start.saturating_add(self.chunk_size) >= len;

        let chunk = Chunk {
            title: self.title.clone(),
            data: self.buffer.slice(start..end),
            chunk_number: self.next_number,
            is_last,
        };

        self.offset = end;
        self.next_number += 1;
        self.finished = is_last;

        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished {
            0
        } else {
            self.expected_chunks() - self.next_number as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Chunks {}

impl std::iter::FusedIterator for Chunks {}
