//! Protobuf messages and clients of the `demokratie` package.
//!
//! Generated from `proto/demokratie.proto` by the build script. Messages that
//! reach HTTP callers also derive serde, using the camelCase field names of
//! the backend's JSON clients.

tonic::include_proto!("demokratie");

impl From<vg_core::Chunk> for Chunk {
    fn from(chunk: vg_core::Chunk) -> Self {
        Self {
            title: chunk.title,
            data: chunk.data,
            chunk_number: chunk.chunk_number,
            is_last: chunk.is_last,
        }
    }
}

impl From<Chunk> for vg_core::Chunk {
    fn from(chunk: Chunk) -> Self {
        Self {
            title: chunk.title,
            data: chunk.data,
            chunk_number: chunk.chunk_number,
            is_last: chunk.is_last,
        }
    }
}
