//! Reference picker options for the slide editor.

use axum::extract::{Query, State};

use super::{error, success, ApiResult};
use crate::models::{ContentOption, ContentOptionsQuery};
use crate::AppState;

/// GET /api/content/options?kind= - Records a slide may reference.
pub async fn list_content_options(
    State(state): State<AppState>,
    Query(query): Query<ContentOptionsQuery>,
) -> ApiResult<Vec<ContentOption>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_content_options(query.kind).await {
        Ok(options) => success(options, revision_id),
        Err(e) => error(e, revision_id),
    }
}
