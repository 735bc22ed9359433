//! Service configuration loaded from the environment

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;

/// HTTP server and upload settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    /// Load the configuration
    ///
    /// # Environment Variables
    /// - `API_HOST`: bind address (default: "0.0.0.0")
    /// - `API_PORT` or `PORT`: listen port (default: 5456, `PORT` wins)
    /// - `API_UPLOAD_DIR`: upload directory (default: "uploads")
    /// - `API_MAX_UPLOAD_BYTES`: request body limit (default: 10 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5456_i64)?
            .set_default("upload_dir", "uploads")?
            .set_default("max_upload_bytes", 10_i64 * 1024 * 1024)?
            .add_source(Environment::with_prefix("API"))
            .set_override_option("port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }

    /// Socket address string for the listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
