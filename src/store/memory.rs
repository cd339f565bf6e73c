//! In-memory repository and blob store.
//!
//! The injectable fakes used by the pipeline tests. They also let the
//! tests assert the no-side-effects-on-failure properties (blob and row
//! counts stay at zero when ingestion or classification fails).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{HotDogError, Result};
use crate::model::{Analysis, AnalysisPage, NewAnalysis};
use crate::store::{AnalysisRepository, BlobStore};

#[derive(Default)]
pub struct MemoryRepository {
    rows: Mutex<Vec<Analysis>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> Result<MutexGuard<'_, Vec<Analysis>>> {
        self.rows
            .lock()
            .map_err(|_| HotDogError::Storage("repository lock poisoned".into()))
    }
}

#[async_trait]
impl AnalysisRepository for MemoryRepository {
    async fn create(&self, record: NewAnalysis) -> Result<Analysis> {
        // Truncate to the same precision the SQLite backend stores, so the
        // two backends are interchangeable in tests.
        let created_at_text = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_text)
            .map_err(|e| HotDogError::Storage(e.to_string()))?
            .with_timezone(&Utc);

        let analysis = Analysis {
            id: Uuid::new_v4().to_string(),
            image_url: record.image_url,
            image_path: record.image_path,
            is_hot_dog: record.verdict.is_hot_dog,
            confidence: record.verdict.confidence,
            category: record.verdict.category,
            hot_dog_count: record.verdict.hot_dog_count,
            style: record.verdict.style,
            reasoning: record.verdict.reasoning,
            detected_items: record.verdict.detected_items,
            session_id: record.session_id,
            created_at,
        };

        self.rows()?.push(analysis.clone());
        Ok(analysis)
    }

    async fn get_by_id(&self, id: &str) -> Result<Analysis> {
        self.rows()?
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| HotDogError::NotFound(format!("analysis {}", id)))
    }

    async fn list_by_session(
        &self,
        session_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<AnalysisPage> {
        let rows = self.rows()?;

        // Insertion order is creation order, so newest-first is a reverse
        // scan. This also keeps same-timestamp records deterministic.
        let matching: Vec<&Analysis> = rows
            .iter()
            .rev()
            .filter(|a| a.session_id == session_id)
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(AnalysisPage { items, total })
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, (Vec<u8>, String)>>,
    base_url: String,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            base_url: base_url.into(),
        }
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs
            .lock()
            .map(|b| b.contains_key(key))
            .unwrap_or(false)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        self.blobs
            .lock()
            .map_err(|_| HotDogError::Upload("blob store lock poisoned".into()))?
            .insert(key.to_string(), (bytes.to_vec(), content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{HotDogCategory, HotDogVerdict};

    fn record(session_id: &str) -> NewAnalysis {
        NewAnalysis {
            image_url: "http://localhost/images/s1/1.png".into(),
            image_path: "s1/1.png".into(),
            verdict: HotDogVerdict {
                is_hot_dog: true,
                confidence: 90.0,
                category: HotDogCategory::HotDog,
                hot_dog_count: 1,
                style: None,
                reasoning: "looks like one".into(),
                detected_items: vec![],
            },
            session_id: session_id.into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = MemoryRepository::new();
        let a = repo.create(record("s1")).await.unwrap();
        let b = repo.create(record("s1")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = MemoryRepository::new();
        let err = repo.get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, HotDogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_session_scoped() {
        let repo = MemoryRepository::new();
        let first = repo.create(record("s1")).await.unwrap();
        let second = repo.create(record("s1")).await.unwrap();
        repo.create(record("other")).await.unwrap();

        let page = repo.list_by_session("s1", 20, 0).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].id, second.id);
        assert_eq!(page.items[1].id, first.id);
    }

    #[tokio::test]
    async fn test_blob_store_url_and_count() {
        let blobs = MemoryBlobStore::new("http://localhost:3000/images/");
        assert_eq!(blobs.blob_count(), 0);
        blobs.put("s1/1.png", b"abc", "image/png").await.unwrap();
        assert_eq!(blobs.blob_count(), 1);
        assert!(blobs.contains("s1/1.png"));
        assert_eq!(
            blobs.public_url("s1/1.png"),
            "http://localhost:3000/images/s1/1.png"
        );
    }
}
