//! vg-rpc: the backend RPC contract.
//!
//! Provides the protobuf messages of the `demokratie` package, tonic clients
//! for its `VideoService` and `UserService`, and the [`VideoBackend`] /
//! [`UserBackend`] traits the HTTP layer is written against.

pub mod backend;
pub mod client;
pub mod proto;
pub mod status;

pub use backend::{GrpcBackend, InboundChunks, OutboundChunks, UserBackend, VideoBackend};
pub use status::status_to_error;
