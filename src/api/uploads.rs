//! Slide image uploads.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::storage::slide_image_path;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub path: String,
    pub url: String,
}

/// POST /api/uploads/slides?filename= - Store a raw image body.
pub async fn upload_slide_image(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<UploadedImage> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let path = match slide_image_path(&query.filename, content_type, body.len()) {
        Ok(path) => path,
        Err(e) => return error(e, revision_id),
    };

    match state.media.upload(&path, &body).await {
        Ok(url) => success(UploadedImage { path, url }, revision_id),
        Err(e) => {
            tracing::error!("Failed to store upload {}: {}", query.filename, e);
            error(e, revision_id)
        }
    }
}
