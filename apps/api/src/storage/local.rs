use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, info};

use super::{PhotoStorage, StorageError};

/// Stores photos as plain files in a single directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a reference to its location on disk.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, StorageError> {
        validate_file_name(reference)?;
        Ok(self.root.join(reference))
    }
}

/// Rejects names that would land outside the storage directory.
/// The name is otherwise used verbatim.
fn validate_file_name(name: &str) -> Result<(), StorageError> {
    let escapes = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if escapes {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl PhotoStorage for LocalStorage {
    async fn store(&self, file_name: &str, content: Bytes) -> Result<String, StorageError> {
        let destination = self.resolve(file_name)?;

        // Idempotent; a no-op when the directory already exists.
        fs::create_dir_all(&self.root)
            .await
            .map_err(io_error(&self.root))?;

        fs::write(&destination, &content)
            .await
            .map_err(io_error(&destination))?;

        info!(
            path = %destination.display(),
            bytes = content.len(),
            "Stored photo file"
        );
        Ok(file_name.to_string())
    }

    async fn load(&self, reference: &str) -> Result<Bytes, StorageError> {
        let path = self.resolve(reference)?;
        let content = fs::read(&path).await.map_err(io_error(&path))?;
        debug!("Loaded {} bytes from {}", content.len(), path.display());
        Ok(Bytes::from(content))
    }
}
