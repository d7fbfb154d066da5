use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::photos::view::PhotoView;
use crate::state::AppState;

/// Multipart field carrying the image bytes.
const PHOTO_FIELD: &str = "photo";
const DEFAULT_LIST_LIMIT: i64 = 100;
const MAX_LIST_LIMIT: i64 = 1000;

/// POST /photo/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PhotoView>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PHOTO_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Validation("Field 'photo' has no file name".to_string()))?;
        let content = field.bytes().await?;

        let record = state.uploader.upload(&file_name, content).await?;
        return Ok(Json(PhotoView::from(record)));
    }

    Err(AppError::Validation(
        "Multipart field 'photo' is required".to_string(),
    ))
}

/// GET /photo/:id
pub async fn handle_get_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PhotoView>, AppError> {
    let record = state
        .photos
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Photo {id} not found")))?;
    Ok(Json(PhotoView::from(record)))
}

/// GET /photo/:id/file
/// Streams back the stored bytes behind a photo record.
pub async fn handle_get_photo_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .photos
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Photo {id} not found")))?;
    let content = state.storage.load(&record.file_path).await?;

    Ok((
        [(header::CONTENT_TYPE, content_type_for(&record.file_path))],
        content,
    ))
}

fn content_type_for(file_path: &str) -> &'static str {
    let extension = file_path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "heic" | "heif" => "image/heif",
        _ => "application/octet-stream",
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// GET /photos
pub async fn handle_list_photos(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<PhotoView>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_LIST_LIMIT}"
        )));
    }

    let records = state.photos.list_recent(limit).await?;
    Ok(Json(records.into_iter().map(PhotoView::from).collect()))
}
