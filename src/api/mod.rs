//! HTTP surface: the axum router and the error-to-status mapping.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::HotDogError;
use crate::pipeline::AnalysisPipeline;

/// Base64-encoded uploads are bulky; allow up to ~20 MB bodies.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
}

/// Builds the application router. When `images_dir` is set, the blob root
/// is served statically under `/images` so public image URLs resolve.
pub fn router(state: AppState, images_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/analyses", get(handlers::list_analyses))
        .route("/api/analyses/:id", get(handlers::get_analysis))
        .route("/api/og", get(handlers::share_preview));

    if let Some(dir) = images_dir {
        router = router.nest_service("/images", ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Transport-level error wrapper. Validation and malformed input map to
/// 400, absence to 404, everything else to 500 with best-effort detail.
pub struct ApiError(HotDogError);

impl From<HotDogError> for ApiError {
    fn from(err: HotDogError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            HotDogError::Validation(message) | HotDogError::InvalidImageFormat(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            HotDogError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Analysis not found" }),
            ),
            HotDogError::Ai(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to analyze image", "details": details }),
            ),
            HotDogError::Upload(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to upload image", "details": details }),
            ),
            other => {
                tracing::error!(error = %other, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "details": other.to_string() }),
                )
            }
        };

        if status.is_client_error() {
            tracing::warn!(%status, error = %self.0, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}
