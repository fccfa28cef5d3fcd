//! Bridges between HTTP bodies and the streaming backend calls.

pub mod download;
pub mod upload;

pub use download::{fetch, parse_video_id, serve};
pub use upload::{upload, upload_file, UploadedFile};
