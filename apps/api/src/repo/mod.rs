//! Persistence for photo records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::photo::{NewPhoto, PhotoRecord};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::InMemoryPhotoRepository;
pub use postgres::PgPhotoRepository;

/// Narrow store for photo records. Records are created once and never
/// updated or deleted.
///
/// Carried in `AppState` and by the upload service as `Arc<dyn PhotoRepository>`.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Assigns a fresh id, persists every field and returns the stored record.
    async fn create(&self, photo: NewPhoto) -> Result<PhotoRecord, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PhotoRecord>, AppError>;

    /// Most recently uploaded first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<PhotoRecord>, AppError>;
}
