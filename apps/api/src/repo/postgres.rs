use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::PhotoRepository;
use crate::errors::AppError;
use crate::models::photo::{NewPhoto, PhotoRecord};

/// `photos` table access over a shared connection pool.
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn create(&self, photo: NewPhoto) -> Result<PhotoRecord, AppError> {
        let photo = photo.into_record(Uuid::new_v4());
        let record = sqlx::query_as::<_, PhotoRecord>(
            r#"
            INSERT INTO photos
                (id, file_path, latitude, longitude, taken_at, uploaded_at, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(photo.id)
        .bind(&photo.file_path)
        .bind(photo.latitude)
        .bind(photo.longitude)
        .bind(photo.taken_at)
        .bind(photo.uploaded_at)
        .bind(photo.user_id)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted photo {} for file {}", record.id, record.file_path);
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PhotoRecord>, AppError> {
        Ok(
            sqlx::query_as::<_, PhotoRecord>("SELECT * FROM photos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<PhotoRecord>, AppError> {
        Ok(sqlx::query_as::<_, PhotoRecord>(
            "SELECT * FROM photos ORDER BY uploaded_at DESC, id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}
