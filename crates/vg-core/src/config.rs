//! Gateway configuration types.
//!
//! The top-level [`Config`] is deserialized from JSON. Every section
//! defaults sensibly so an empty `{}` file is valid; CLI flags and
//! environment variables override individual fields at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load configuration strictly: missing or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if let Some(ref dir) = self.server.static_dir {
            if !dir.exists() {
                warnings.push(format!(
                    "server.static_dir {} does not exist; static assets disabled",
                    dir.display()
                ));
            }
        }

        if !self.backend.url.starts_with("http://") && !self.backend.url.starts_with("https://") {
            warnings.push(format!(
                "backend.url '{}' has no http:// or https:// scheme",
                self.backend.url
            ));
        }

        if self.upload.chunk_size == 0 {
            warnings.push(format!(
                "upload.chunk_size is 0; falling back to {DEFAULT_CHUNK_SIZE}"
            ));
        }

        if self.upload.max_upload_bytes < self.upload.chunk_size {
            warnings.push("upload.max_upload_bytes is smaller than one chunk".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of static frontend assets served as the router fallback.
    pub static_dir: Option<PathBuf>,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            static_dir: None,
            cors: CorsConfig::default(),
        }
    }
}

/// Cross-origin settings for browser frontends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// Mirror the request origin and allow cookies/credentials.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_credentials: true,
        }
    }
}

/// Remote chunk-store service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub connect_timeout_secs: Option<u64>,
    /// Per-call deadline; `None` leaves the transport defaults in place.
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:50000".into(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

/// Upload path settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub chunk_size: usize,
    pub max_upload_bytes: usize,
}

impl UploadConfig {
    /// Chunk size to use, substituting the default for a zero value.
    pub fn effective_chunk_size(&self) -> usize {
        if self.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            self.chunk_size
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_upload_bytes: 1024 * 1024 * 1024,
        }
    }
}
