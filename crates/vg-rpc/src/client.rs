//! Channel setup and the generated `VideoService` / `UserService` clients.
//!
//! Both clients wrap a shared [`Channel`]; cloning a client clones the
//! channel handle, which is how concurrent requests reuse one connection.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

use vg_core::config::BackendConfig;

use crate::proto::user_service_client;
use crate::proto::video_service_client;

pub type VideoServiceClient = video_service_client::VideoServiceClient<Channel>;
pub type UserServiceClient = user_service_client::UserServiceClient<Channel>;

/// Build a lazily-connecting channel to the backend.
///
/// No connection is attempted until the first call, so the gateway can start
/// before the backend is reachable.
pub fn connect_lazy(config: &BackendConfig) -> vg_core::Result<Channel> {
    let mut endpoint = Endpoint::from_shared(config.url.clone()).map_err(|e| {
        vg_core::Error::Validation(format!("invalid backend url '{}': {e}", config.url))
    })?;

    if let Some(secs) = config.connect_timeout_secs {
        endpoint = endpoint.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = config.request_timeout_secs {
        endpoint = endpoint.timeout(Duration::from_secs(secs));
    }

    Ok(endpoint.connect_lazy())
}
