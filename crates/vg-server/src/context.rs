//! Application context shared by all route handlers via Axum state.
//!
//! The backend handles are built once at startup and never mutated; every
//! request borrows them through an `Arc`.

use std::sync::Arc;

use vg_core::config::Config;
use vg_rpc::{GrpcBackend, UserBackend, VideoBackend};

/// Cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable configuration snapshot.
    pub config: Arc<Config>,
    /// Chunk-store service used by the video bridges.
    pub video: Arc<dyn VideoBackend>,
    /// User record service used by the forwarding routes.
    pub users: Arc<dyn UserBackend>,
}

impl AppContext {
    pub fn new(
        config: Config,
        video: Arc<dyn VideoBackend>,
        users: Arc<dyn UserBackend>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            video,
            users,
        }
    }

    /// Build a context whose backends share one lazily-connected gRPC channel.
    pub fn from_config(config: Config) -> vg_core::Result<Self> {
        let backend = Arc::new(GrpcBackend::from_config(&config.backend)?);
        Ok(Self::new(config, backend.clone(), backend))
    }
}
