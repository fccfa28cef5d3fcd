//! Backend seams used by the HTTP layer.
//!
//! [`VideoBackend`] and [`UserBackend`] describe the two remote services at
//! the message level. [`GrpcBackend`] implements both over one shared tonic
//! channel; tests substitute in-process doubles.

use async_trait::async_trait;
use futures::future::FutureExt;
use futures::stream::{BoxStream, StreamExt};
use tonic::transport::Channel;
use tonic::{Response, Status};

use vg_core::config::BackendConfig;

use crate::client::{connect_lazy, UserServiceClient, VideoServiceClient};
use crate::proto;

/// Chunks sent to the backend during an upload.
pub type OutboundChunks = BoxStream<'static, proto::Chunk>;

/// Chunks received from the backend during a download.
pub type InboundChunks = BoxStream<'static, Result<proto::Chunk, Status>>;

/// Remote chunk store: client-streaming upload and server-streaming download.
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// Send every chunk of `chunks` in order and wait for the single
    /// acknowledgment. The request stream ends when `chunks` ends.
    async fn upload_video(&self, chunks: OutboundChunks)
        -> Result<proto::UploadVideoResponse, Status>;

    /// Open the chunk stream for one stored video.
    async fn stream_video(&self, request: proto::StreamVideoRequest)
        -> Result<InboundChunks, Status>;
}

/// Remote user record service.
#[async_trait]
pub trait UserBackend: Send + Sync {
    async fn create_user(
        &self,
        request: proto::CreateUserRequest,
    ) -> Result<proto::CreateUserResponse, Status>;

    async fn get_user(&self, request: proto::GetUserRequest)
        -> Result<proto::GetUserResponse, Status>;

    async fn update_user(
        &self,
        request: proto::UpdateUserRequest,
    ) -> Result<proto::UpdateUserResponse, Status>;

    async fn delete_user(
        &self,
        request: proto::DeleteUserRequest,
    ) -> Result<proto::DeleteUserResponse, Status>;

    async fn list_users(
        &self,
        request: proto::ListUsersRequest,
    ) -> Result<proto::ListUsersResponse, Status>;
}

/// Both services over one lazily-connected channel.
#[derive(Debug, Clone)]
pub struct GrpcBackend {
    video: VideoServiceClient,
    users: UserServiceClient,
}

impl GrpcBackend {
    pub fn new(channel: Channel) -> Self {
        Self {
            video: VideoServiceClient::new(channel.clone()),
            users: UserServiceClient::new(channel),
        }
    }

    /// Build the backend from configuration without connecting yet.
    pub fn from_config(config: &BackendConfig) -> vg_core::Result<Self> {
        let channel = connect_lazy(config)?;
        tracing::info!(url = %config.url, "Backend channel configured (lazy connect)");
        Ok(Self::new(channel))
    }
}

#[async_trait]
impl VideoBackend for GrpcBackend {
    async fn upload_video(
        &self,
        chunks: OutboundChunks,
    ) -> Result<proto::UploadVideoResponse, Status> {
        let mut client = self.video.clone();
        client
            .upload_video(chunks)
            .boxed()
            .await
            .map(Response::into_inner)
    }

    async fn stream_video(
        &self,
        request: proto::StreamVideoRequest,
    ) -> Result<InboundChunks, Status> {
        let response = self.video.clone().stream_video(request).await?;
        Ok(response.into_inner().boxed())
    }
}

#[async_trait]
impl UserBackend for GrpcBackend {
    async fn create_user(
        &self,
        request: proto::CreateUserRequest,
    ) -> Result<proto::CreateUserResponse, Status> {
        self.users
            .clone()
            .create_user(request)
            .await
            .map(Response::into_inner)
    }

    async fn get_user(
        &self,
        request: proto::GetUserRequest,
    ) -> Result<proto::GetUserResponse, Status> {
        self.users
            .clone()
            .get_user(request)
            .await
            .map(Response::into_inner)
    }

    async fn update_user(
        &self,
        request: proto::UpdateUserRequest,
    ) -> Result<proto::UpdateUserResponse, Status> {
        self.users
            .clone()
            .update_user(request)
            .await
            .map(Response::into_inner)
    }

    async fn delete_user(
        &self,
        request: proto::DeleteUserRequest,
    ) -> Result<proto::DeleteUserResponse, Status> {
        self.users
            .clone()
            .delete_user(request)
            .await
            .map(Response::into_inner)
    }

    async fn list_users(
        &self,
        request: proto::ListUsersRequest,
    ) -> Result<proto::ListUsersResponse, Status> {
        self.users
            .clone()
            .list_users(request)
            .await
            .map(Response::into_inner)
    }
}
