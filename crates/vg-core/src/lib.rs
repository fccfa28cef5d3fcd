//! vg-core: shared errors, configuration, chunking, and byte-range resolution.
//!
//! Everything in this crate is transport-free. The RPC contract lives in
//! `vg-rpc` and the HTTP surface in `vg-server`; both funnel their failures
//! into [`Error`].

pub mod chunk;
pub mod config;
pub mod error;
pub mod range;

// Re-export the most commonly used items at the crate root.
pub use chunk::{chunks_of, Chunk, Chunks, DEFAULT_CHUNK_SIZE};
pub use error::{Error, Result};
pub use range::{resolve, RangeSpec, ResolvedRange};
