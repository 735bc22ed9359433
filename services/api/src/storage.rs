//! Local image storage for uploaded files
//!
//! Every stored file gets a fresh `{token}{.extension}` name. The token is the
//! current time in milliseconds, forced strictly increasing inside the process,
//! and files are opened with create-new semantics so an existing file is never
//! replaced. Nothing of the client's file name is kept except a plain
//! alphanumeric extension.

use chrono::Utc;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};
use thiserror::Error;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info, warn};

/// URL prefix the upload directory is served under
pub const UPLOADS_ROUTE: &str = "/uploads";

const MAX_EXTENSION_LEN: usize = 16;
const MAX_NAME_ATTEMPTS: usize = 64;

/// Errors raised while writing an upload to disk
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find a free file name in {}", .0.display())]
    NamesExhausted(PathBuf),
}

/// A file written by [`ImageStore::store`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated file name, e.g. `1718000000000.png`
    pub file_name: String,
    /// Extension kept from the client's file name, without the dot
    pub extension: Option<String>,
    /// Location on disk
    pub path: PathBuf,
    /// Path the file is served at, e.g. `/uploads/1718000000000.png`
    pub public_path: String,
}

/// Writes uploads into a single directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    last_token: Arc<AtomicI64>,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_token: Arc::new(AtomicI64::new(0)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;

        info!("Upload directory ready at {}", self.dir.display());
        Ok(())
    }

    /// Persist `bytes` under a freshly generated name
    pub async fn store(
        &self,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<StoredFile, StorageError> {
        let extension = sanitized_extension(original_filename);

        for _ in 0..MAX_NAME_ATTEMPTS {
            let token = self.next_token();
            let file_name = match &extension {
                Some(ext) => format!("{}.{}", token, ext),
                None => token.to_string(),
            };
            let path = self.dir.join(&file_name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} already exists, trying the next token", file_name);
                    continue;
                }
                Err(source) => return Err(StorageError::Io { path, source }),
            };

            let written = async {
                file.write_all(bytes).await?;
                file.flush().await
            }
            .await;
            drop(file);

            if let Err(source) = written {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    warn!("Failed to remove partial upload {}: {}", path.display(), e);
                }
                return Err(StorageError::Io { path, source });
            }

            info!("Stored upload {} ({} bytes)", file_name, bytes.len());
            return Ok(StoredFile {
                public_path: format!("{}/{}", UPLOADS_ROUTE, file_name),
                file_name,
                extension,
                path,
            });
        }

        Err(StorageError::NamesExhausted(self.dir.clone()))
    }

    fn next_token(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_token
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);

        now.max(previous + 1)
    }
}

fn sanitized_extension(original_filename: &str) -> Option<String> {
    let extension = Path::new(original_filename).extension()?.to_str()?;

    let valid = !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());

    valid.then(|| extension.to_string())
}
