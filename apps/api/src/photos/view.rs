use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::photo::PhotoRecord;

/// Response shape for a photo. Mirrors [`PhotoRecord`] field for field so the
/// persistence row never crosses the HTTP boundary directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    pub id: Uuid,
    pub file_path: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub taken_at: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

impl From<PhotoRecord> for PhotoView {
    fn from(record: PhotoRecord) -> Self {
        Self {
            id: record.id,
            file_path: record.file_path,
            latitude: record.latitude,
            longitude: record.longitude,
            taken_at: record.taken_at,
            uploaded_at: record.uploaded_at,
            user_id: record.user_id,
        }
    }
}

impl From<PhotoView> for PhotoRecord {
    fn from(view: PhotoView) -> Self {
        Self {
            id: view.id,
            file_path: view.file_path,
            latitude: view.latitude,
            longitude: view.longitude,
            taken_at: view.taken_at,
            uploaded_at: view.uploaded_at,
            user_id: view.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn full_record() -> PhotoRecord {
        PhotoRecord {
            id: Uuid::new_v4(),
            file_path: "a.jpg".to_string(),
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
            taken_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            uploaded_at: Utc::now(),
            user_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn test_record_view_round_trip_is_identity() {
        let record = full_record();
        let back = PhotoRecord::from(PhotoView::from(record.clone()));
        assert_eq!(back, record);

        let sparse = PhotoRecord {
            latitude: None,
            longitude: None,
            taken_at: None,
            user_id: None,
            ..full_record()
        };
        assert_eq!(PhotoRecord::from(PhotoView::from(sparse.clone())), sparse);
    }

    #[test]
    fn test_serializes_camel_case_with_nulls() {
        let record = PhotoRecord {
            latitude: None,
            longitude: None,
            taken_at: None,
            user_id: None,
            ..full_record()
        };
        let value = serde_json::to_value(PhotoView::from(record.clone())).unwrap();

        assert_eq!(value["id"], json!(record.id));
        assert_eq!(value["filePath"], "a.jpg");
        assert!(value["latitude"].is_null());
        assert!(value["longitude"].is_null());
        assert!(value["takenAt"].is_null());
        assert!(value["userId"].is_null());
        assert!(value["uploadedAt"].is_string());
        assert_eq!(value.as_object().unwrap().len(), 7);
    }
}
