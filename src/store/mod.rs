//! Persistence capability interfaces.
//!
//! The pipeline depends on these narrow traits; concrete backends (SQLite +
//! filesystem in the server, in-memory fakes in tests) are injected at
//! composition time.

mod fs;
mod memory;
mod sqlite;

pub use fs::FsBlobStore;
pub use memory::{MemoryBlobStore, MemoryRepository};
pub use sqlite::SqliteRepository;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Analysis, AnalysisPage, NewAnalysis};

/// Default page size for history listings.
pub const DEFAULT_LIMIT: u32 = 20;
/// Default page start for history listings.
pub const DEFAULT_OFFSET: u32 = 0;

/// Durable storage for analysis records. Create and read only; records are
/// never mutated or deleted.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Inserts a new record, assigning `id` and `created_at`, and returns
    /// the full persisted record.
    async fn create(&self, record: NewAnalysis) -> Result<Analysis>;

    /// Point lookup. Absence is `HotDogError::NotFound`, distinct from
    /// other storage failures.
    async fn get_by_id(&self, id: &str) -> Result<Analysis>;

    /// Returns the session's records ordered newest-first, sliced to
    /// `[offset, offset + limit)`, plus the total count for the filter.
    async fn list_by_session(
        &self,
        session_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<AnalysisPage>;
}

/// Blob storage with durable public URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes a blob under `key`. Failure is `HotDogError::Upload`.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;

    /// Resolves the durable public URL for a stored key.
    fn public_url(&self, key: &str) -> String;
}
