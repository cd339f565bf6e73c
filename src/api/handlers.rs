//! Request handlers for the four endpoints.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::api::{ApiError, AppState};
use crate::error::HotDogError;
use crate::model::{AnalysisResponse, ListAnalysesResponse};
use crate::store::{DEFAULT_LIMIT, DEFAULT_OFFSET};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub session_id: String,
}

/// `POST /api/analyze` — classify an image and persist the result.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let response = state
        .pipeline
        .analyze(&request.image, &request.session_id)
        .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub session_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// `GET /api/analyses` — a session's history, newest first.
pub async fn list_analyses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListAnalysesResponse>, ApiError> {
    let session_id = query.session_id.unwrap_or_default();
    let response = state
        .pipeline
        .list_analyses(
            &session_id,
            query.limit.unwrap_or(DEFAULT_LIMIT),
            query.offset.unwrap_or(DEFAULT_OFFSET),
        )
        .await?;
    Ok(Json(response))
}

/// `GET /api/analyses/{id}` — one analysis for detail and share views.
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let response = state.pipeline.get_analysis(&id).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ShareQuery {
    pub id: Option<String>,
}

/// `GET /api/og?id=` — the 1200×630 share preview image.
pub async fn share_preview(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Result<Response, ApiError> {
    let id = query
        .id
        .ok_or_else(|| HotDogError::Validation("Missing id parameter".into()))?;

    let preview = state.pipeline.share_preview(&id).await?;
    let svg = preview.render_svg();

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        svg,
    )
        .into_response())
}
