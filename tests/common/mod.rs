//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which wires in-process backend doubles into a
//! full [`AppContext`]. The `with_*server` constructors start Axum on a
//! random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use tonic::Status;

use vg_core::config::Config;
use vg_core::chunks_of;
use vg_rpc::proto;
use vg_rpc::{InboundChunks, OutboundChunks, UserBackend, VideoBackend};
use vg_server::context::AppContext;

/// Id of the only video [`MockVideoBackend`] knows about.
pub const STORED_VIDEO_ID: i32 = 1;

/// Id returned in every successful upload acknowledgment.
pub const UPLOADED_VIDEO_ID: i32 = 42;

/// Video service double: records uploads, replays one stored video.
pub struct MockVideoBackend {
    pub stored: Bytes,
    /// Size of the chunks `stored` is replayed in.
    pub chunk_size: usize,
    pub fail_upload: bool,
    /// Abort the download stream after this many chunks.
    pub fail_stream_after: Option<usize>,
    pub uploaded: Mutex<Vec<proto::Chunk>>,
    pub upload_calls: AtomicUsize,
    pub stream_calls: AtomicUsize,
}

impl Default for MockVideoBackend {
    fn default() -> Self {
        Self {
            stored: Bytes::new(),
            chunk_size: 256,
            fail_upload: false,
            fail_stream_after: None,
            uploaded: Mutex::new(Vec::new()),
            upload_calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
        }
    }
}

impl MockVideoBackend {
    /// A backend storing `len` bytes of patterned data under [`STORED_VIDEO_ID`].
    pub fn serving(len: usize) -> Self {
        Self {
            stored: pattern(len),
            ..Default::default()
        }
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }

    /// Every chunk received so far, in arrival order.
    pub fn uploaded(&self) -> Vec<proto::Chunk> {
        self.uploaded.lock().clone()
    }
}

#[async_trait]
impl VideoBackend for MockVideoBackend {
    async fn upload_video(
        &self,
        mut chunks: OutboundChunks,
    ) -> Result<proto::UploadVideoResponse, Status> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        while let Some(chunk) = chunks.next().await {
            self.uploaded.lock().push(chunk);
        }
        if self.fail_upload {
            return Err(Status::unavailable("chunk store offline"));
        }
        Ok(proto::UploadVideoResponse {
            success: true,
            message: "Video uploaded".into(),
            video_id: UPLOADED_VIDEO_ID,
        })
    }

    async fn stream_video(
        &self,
        request: proto::StreamVideoRequest,
    ) -> Result<InboundChunks, Status> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        if request.video_id != STORED_VIDEO_ID {
            return Err(Status::not_found(format!(
                "video {} not found",
                request.video_id
            )));
        }

        let chunks = chunks_of(self.stored.clone(), "stored.mp4", self.chunk_size)
            .map_err(|e| Status::internal(e.to_string()))?;
        let mut items: Vec<Result<proto::Chunk, Status>> =
            chunks.map(|c| Ok(proto::Chunk::from(c))).collect();
        if let Some(n) = self.fail_stream_after {
            items.truncate(n);
            items.push(Err(Status::internal("read error in chunk store")));
        }
        Ok(stream::iter(items).boxed())
    }
}

/// In-memory user service double.
#[derive(Default)]
pub struct MockUserBackend {
    pub users: Mutex<Vec<proto::User>>,
    pub last_update: Mutex<Option<proto::UpdateUserRequest>>,
    next_id: AtomicI32,
}

impl MockUserBackend {
    fn find(&self, id: i32) -> Result<proto::User, Status> {
        self.users
            .lock()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl UserBackend for MockUserBackend {
    async fn create_user(
        &self,
        request: proto::CreateUserRequest,
    ) -> Result<proto::CreateUserResponse, Status> {
        if request.name.is_empty() {
            return Err(Status::invalid_argument("name is required"));
        }
        let user = proto::User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: request.name,
            email: request.email,
        };
        self.users.lock().push(user.clone());
        Ok(proto::CreateUserResponse { user: Some(user) })
    }

    async fn get_user(
        &self,
        request: proto::GetUserRequest,
    ) -> Result<proto::GetUserResponse, Status> {
        let user = self.find(request.id)?;
        Ok(proto::GetUserResponse { user: Some(user) })
    }

    async fn update_user(
        &self,
        request: proto::UpdateUserRequest,
    ) -> Result<proto::UpdateUserResponse, Status> {
        *self.last_update.lock() = Some(request.clone());
        let mut users = self.users.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id == request.id)
            .ok_or_else(|| Status::not_found(format!("user {} not found", request.id)))?;
        user.name = request.name;
        user.email = request.email;
        Ok(proto::UpdateUserResponse {
            user: Some(user.clone()),
        })
    }

    async fn delete_user(
        &self,
        request: proto::DeleteUserRequest,
    ) -> Result<proto::DeleteUserResponse, Status> {
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|u| u.id != request.id);
        Ok(proto::DeleteUserResponse {
            success: users.len() < before,
        })
    }

    async fn list_users(
        &self,
        _request: proto::ListUsersRequest,
    ) -> Result<proto::ListUsersResponse, Status> {
        Ok(proto::ListUsersResponse {
            users: self.users.lock().clone(),
        })
    }
}

/// Test harness wrapping a fully-constructed [`AppContext`] backed by
/// in-process doubles.
pub struct TestHarness {
    pub ctx: AppContext,
    pub video: Arc<MockVideoBackend>,
    pub users: Arc<MockUserBackend>,
}

impl TestHarness {
    /// Create a new harness with default configuration and an empty store.
    pub fn new() -> Self {
        Self::with_config(Config::default(), MockVideoBackend::default())
    }

    pub fn with_config(config: Config, video: MockVideoBackend) -> Self {
        let video = Arc::new(video);
        let users = Arc::new(MockUserBackend::default());
        let ctx = AppContext::new(config, video.clone(), users.clone());
        Self { ctx, video, users }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default(), MockVideoBackend::default()).await
    }

    /// Start an Axum server against a custom video backend.
    pub async fn with_video_server(video: MockVideoBackend) -> (Self, SocketAddr) {
        Self::with_server_config(Config::default(), video).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config, video: MockVideoBackend) -> (Self, SocketAddr) {
        let harness = Self::with_config(config, video);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        let ctx = harness.ctx.clone();
        tokio::spawn(async move {
            vg_server::serve(listener, ctx, std::future::pending()).await.ok();
        });

        (harness, addr)
    }

    /// Seed a user directly into the user double.
    pub fn create_user(&self, name: &str, email: &str) -> proto::User {
        let id = self.users.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = proto::User {
            id,
            name: name.into(),
            email: email.into(),
        };
        self.users.users.lock().push(user.clone());
        user
    }
}

/// Deterministic, non-uniform test payload.
pub fn pattern(len: usize) -> Bytes {
    (0..len).map(|i| (i % 251) as u8).collect::<Vec<u8>>().into()
}
