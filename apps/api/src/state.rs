use std::sync::Arc;

use crate::config::Config;
use crate::photos::service::PhotoUploader;
use crate::repo::PhotoRepository;
use crate::storage::PhotoStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub uploader: Arc<PhotoUploader>,
    /// Read side of the same store the uploader writes to.
    pub photos: Arc<dyn PhotoRepository>,
    /// Same storage the uploader writes to; serves stored bytes back.
    pub storage: Arc<dyn PhotoStorage>,
    pub config: Config,
}
