use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One uploaded photo as persisted in the `photos` table.
///
/// `latitude` and `longitude` are either both set or both `None`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PhotoRecord {
    pub id: Uuid,
    pub file_path: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub taken_at: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

/// A photo that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub file_path: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub taken_at: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

impl NewPhoto {
    pub fn into_record(self, id: Uuid) -> PhotoRecord {
        PhotoRecord {
            id,
            file_path: self.file_path,
            latitude: self.latitude,
            longitude: self.longitude,
            taken_at: self.taken_at,
            uploaded_at: self.uploaded_at,
            user_id: self.user_id,
        }
    }
}
