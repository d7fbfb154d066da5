pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::photos::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/photo/upload",
            post(handlers::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/photo/:id", get(handlers::handle_get_photo))
        .route("/photo/:id/file", get(handlers::handle_get_photo_file))
        .route("/photos", get(handlers::handle_list_photos))
        .with_state(state)
}
