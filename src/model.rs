//! Domain entities and the canonical response shape.
//!
//! `Analysis` is the persisted record (snake_case, internal). The public
//! contract across every endpoint is `AnalysisResponse` (camelCase); the
//! internal field names never cross that boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{HotDogCategory, HotDogVerdict};

/// A record submitted for insertion. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub image_url: String,
    pub image_path: String,
    pub verdict: HotDogVerdict,
    pub session_id: String,
}

/// The persisted record of one classification run. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: String,
    pub image_url: String,
    pub image_path: String,
    pub is_hot_dog: bool,
    pub confidence: f64,
    pub category: HotDogCategory,
    pub hot_dog_count: u32,
    pub style: Option<String>,
    pub reasoning: String,
    pub detected_items: Vec<String>,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

/// One page of a session's history plus the total count for the whole
/// session filter (not the page), so callers can compute page counts.
#[derive(Debug, Clone)]
pub struct AnalysisPage {
    pub items: Vec<Analysis>,
    pub total: u64,
}

/// Canonical external response shape, stable across all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub id: String,
    pub image_url: String,
    pub is_hot_dog: bool,
    pub confidence: f64,
    pub category: HotDogCategory,
    pub hot_dog_count: u32,
    pub style: Option<String>,
    pub reasoning: String,
    pub detected_items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        AnalysisResponse {
            id: analysis.id,
            image_url: analysis.image_url,
            is_hot_dog: analysis.is_hot_dog,
            confidence: analysis.confidence,
            category: analysis.category,
            hot_dog_count: analysis.hot_dog_count,
            style: analysis.style,
            reasoning: analysis.reasoning,
            detected_items: analysis.detected_items,
            created_at: analysis.created_at,
        }
    }
}

/// Response body of the history listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAnalysesResponse {
    pub analyses: Vec<AnalysisResponse>,
    pub total: u64,
}

impl From<AnalysisPage> for ListAnalysesResponse {
    fn from(page: AnalysisPage) -> Self {
        ListAnalysesResponse {
            analyses: page.items.into_iter().map(AnalysisResponse::from).collect(),
            total: page.total,
        }
    }
}
