//! The classification collaborator interface.
//!
//! The pipeline only depends on this trait; the hosted vision model behind
//! it is swappable (and stubbed in tests).

mod openai;

pub use openai::OpenAiClassifier;

use async_trait::async_trait;

use crate::error::Result;
use crate::schema::HotDogVerdict;

/// A hosted vision model that returns a schema-constrained verdict for an
/// image.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        image: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<HotDogVerdict>;
}
