mod config;
mod db;
mod errors;
mod metadata;
mod models;
mod photos;
mod repo;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::metadata::ExifLocationExtractor;
use crate::photos::service::PhotoUploader;
use crate::repo::{PgPhotoRepository, PhotoRepository};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{LocalStorage, PhotoStorage};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mosaic API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let photos: Arc<dyn PhotoRepository> = Arc::new(PgPhotoRepository::new(db));

    // Initialize local photo storage
    let local = LocalStorage::new(config.storage_dir.clone());
    info!("Photo storage at {}", local.root().display());
    let storage: Arc<dyn PhotoStorage> = Arc::new(local);

    let uploader = PhotoUploader::new(
        Arc::clone(&storage),
        Arc::new(ExifLocationExtractor),
        Arc::clone(&photos),
    );

    // Build app state
    let state = AppState {
        uploader: Arc::new(uploader),
        photos,
        storage,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the mobile client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
