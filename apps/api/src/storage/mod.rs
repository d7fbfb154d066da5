//! Photo file storage.
//!
//! A stored photo is addressed by its reference, which is the original upload
//! file name. Two uploads with the same name share a reference and the later
//! write replaces the earlier file.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod local;

pub use local::LocalStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file name '{0}' is not a plain file name")]
    InvalidName(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where uploaded photo bytes live.
///
/// Carried by the upload service as `Arc<dyn PhotoStorage>`.
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Writes `content` under `file_name`, replacing any existing file, and
    /// returns the reference to record for it.
    async fn store(&self, file_name: &str, content: Bytes) -> Result<String, StorageError>;

    /// Reads back the bytes behind a reference returned by [`store`](Self::store).
    async fn load(&self, reference: &str) -> Result<Bytes, StorageError>;
}
