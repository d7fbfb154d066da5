//! Upload pipeline: store the file, read its location, persist the record.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tokio::task;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::metadata::{GeoPoint, LocationExtractor};
use crate::models::photo::{NewPhoto, PhotoRecord};
use crate::repo::PhotoRepository;
use crate::storage::PhotoStorage;

/// Composes the three upload collaborators. Built once in `main` and shared
/// through `AppState`.
pub struct PhotoUploader {
    storage: Arc<dyn PhotoStorage>,
    locator: Arc<dyn LocationExtractor>,
    photos: Arc<dyn PhotoRepository>,
}

impl PhotoUploader {
    pub fn new(
        storage: Arc<dyn PhotoStorage>,
        locator: Arc<dyn LocationExtractor>,
        photos: Arc<dyn PhotoRepository>,
    ) -> Self {
        Self {
            storage,
            locator,
            photos,
        }
    }

    /// Stores `content` under `file_name`, then persists a record for it.
    ///
    /// A storage failure aborts before anything is persisted. A missing or
    /// unreadable location never fails the upload.
    pub async fn upload(&self, file_name: &str, content: Bytes) -> Result<PhotoRecord, AppError> {
        let file_path = self.storage.store(file_name, content.clone()).await?;

        let location = self.locate(content).await;

        let photo = NewPhoto {
            file_path,
            latitude: location.map(|p| p.latitude),
            longitude: location.map(|p| p.longitude),
            taken_at: None,
            uploaded_at: Utc::now(),
            user_id: None,
        };

        let record = self.photos.create(photo).await?;
        info!(
            photo_id = %record.id,
            file_path = %record.file_path,
            has_location = location.is_some(),
            "Photo uploaded"
        );
        Ok(record)
    }

    async fn locate(&self, content: Bytes) -> Option<GeoPoint> {
        let locator = Arc::clone(&self.locator);
        match task::spawn_blocking(move || locator.extract(&content)).await {
            Ok(location) => location,
            Err(e) => {
                warn!(error = %e, "Location extraction task did not complete");
                None
            }
        }
    }
}
