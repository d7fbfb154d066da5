use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::PhotoRepository;
use crate::errors::AppError;
use crate::models::photo::{NewPhoto, PhotoRecord};

/// Vec-backed store used by service and router tests.
#[derive(Default)]
pub struct InMemoryPhotoRepository {
    records: Mutex<Vec<PhotoRecord>>,
}

impl InMemoryPhotoRepository {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl PhotoRepository for InMemoryPhotoRepository {
    async fn create(&self, photo: NewPhoto) -> Result<PhotoRecord, AppError> {
        let record = photo.into_record(Uuid::new_v4());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PhotoRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<PhotoRecord>, AppError> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn new_photo(name: &str, uploaded_at: chrono::DateTime<Utc>) -> NewPhoto {
        NewPhoto {
            file_path: name.to_string(),
            latitude: None,
            longitude: None,
            taken_at: None,
            uploaded_at,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_list_recent_breaks_timestamp_ties_by_id() {
        let repo = InMemoryPhotoRepository::default();
        let now = Utc::now();
        let older = repo
            .create(new_photo("older.jpg", now - Duration::seconds(5)))
            .await
            .unwrap();
        let mut tied = Vec::new();
        for name in ["a.jpg", "b.jpg", "c.jpg", "d.jpg"] {
            tied.push(repo.create(new_photo(name, now)).await.unwrap());
        }
        tied.sort_by_key(|r| r.id);

        let listed = repo.list_recent(10).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|r| r.id).collect();
        let mut expected: Vec<Uuid> = tied.iter().map(|r| r.id).collect();
        expected.push(older.id);
        assert_eq!(ids, expected);

        assert_eq!(repo.list_recent(2).await.unwrap().len(), 2);
    }
}
