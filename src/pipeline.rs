//! The analysis pipeline: validate → ingest → classify → persist, plus the
//! retrieval wrappers over the store.
//!
//! Each call is stateless and independent; the same image analyzed twice
//! produces two distinct records (no deduplication). Ordering within a call
//! is strict: upload, then the model call, then the insert. A persist
//! failure leaves the already-uploaded blob behind — accepted, not
//! compensated.

use std::sync::Arc;

use crate::classifier::Classifier;
use crate::error::{HotDogError, Result};
use crate::ingest;
use crate::model::{AnalysisResponse, ListAnalysesResponse, NewAnalysis};
use crate::prompts;
use crate::share::SharePreview;
use crate::store::{AnalysisRepository, BlobStore};

pub struct AnalysisPipeline {
    classifier: Arc<dyn Classifier>,
    repository: Arc<dyn AnalysisRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl AnalysisPipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        repository: Arc<dyn AnalysisRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            classifier,
            repository,
            blobs,
        }
    }

    /// Runs one classification end to end and returns the persisted record
    /// in canonical shape.
    pub async fn analyze(&self, image: &str, session_id: &str) -> Result<AnalysisResponse> {
        if image.trim().is_empty() || session_id.trim().is_empty() {
            return Err(HotDogError::Validation(
                "Missing required fields: image and sessionId".into(),
            ));
        }

        let (stored, decoded) = ingest::ingest(self.blobs.as_ref(), session_id, image).await?;
        tracing::debug!(key = %stored.storage_key, bytes = decoded.bytes.len(), "image uploaded");

        let instruction = prompts::build_classification_prompt();
        let verdict = self
            .classifier
            .classify(&decoded.bytes, &decoded.mime_type(), &instruction)
            .await?
            // Re-checked here so a misbehaving backend cannot slip an
            // out-of-contract verdict into the store.
            .validate()?;

        tracing::info!(
            is_hot_dog = verdict.is_hot_dog,
            confidence = verdict.confidence,
            category = verdict.category.as_str(),
            "classification complete"
        );

        let analysis = self
            .repository
            .create(NewAnalysis {
                image_url: stored.public_url,
                image_path: stored.storage_key,
                verdict,
                session_id: session_id.to_string(),
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "persist failed, uploaded blob is orphaned");
                e
            })?;

        Ok(analysis.into())
    }

    /// Fetches a single analysis by id in canonical shape.
    pub async fn get_analysis(&self, id: &str) -> Result<AnalysisResponse> {
        if id.trim().is_empty() {
            return Err(HotDogError::Validation("Analysis ID is required".into()));
        }
        Ok(self.repository.get_by_id(id).await?.into())
    }

    /// Lists a session's history, newest first, with the filter-wide total.
    pub async fn list_analyses(
        &self,
        session_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ListAnalysesResponse> {
        if session_id.trim().is_empty() {
            return Err(HotDogError::Validation("sessionId is required".into()));
        }
        let page = self
            .repository
            .list_by_session(session_id, limit, offset)
            .await?;
        Ok(page.into())
    }

    /// Builds the deterministic share preview for a stored analysis.
    pub async fn share_preview(&self, id: &str) -> Result<SharePreview> {
        if id.trim().is_empty() {
            return Err(HotDogError::Validation("Analysis ID is required".into()));
        }
        let analysis = self.repository.get_by_id(id).await?;
        Ok(SharePreview::from_analysis(&analysis))
    }
}
