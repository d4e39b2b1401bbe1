//! Slide admin API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateSlideRequest, MoveSlideRequest, Slide, UpdateSlideRequest};
use crate::AppState;

/// GET /api/slides - List all slides, active or not, in display order.
pub async fn list_slides(State(state): State<AppState>) -> ApiResult<Vec<Slide>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_slides().await {
        Ok(slides) => success(slides, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/slides/:id - Get a single slide.
pub async fn get_slide(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Slide> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_slide(&id).await {
        Ok(Some(slide)) => success(slide, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Slide {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/slides - Create a slide at the end of the display order.
pub async fn create_slide(
    State(state): State<AppState>,
    Json(request): Json<CreateSlideRequest>,
) -> ApiResult<Slide> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let target = match request.validate() {
        Ok(target) => target,
        Err(e) => return error(e, revision_id),
    };

    match state.repo.create_slide(&request, target).await {
        Ok(slide) => {
            tracing::info!("Created slide {} at order {}", slide.id, slide.order_index);
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(slide, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/slides/:id - Update a slide.
pub async fn update_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSlideRequest>,
) -> ApiResult<Slide> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.update_slide(&id, &request).await {
        Ok(slide) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(slide, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/slides/:id/toggle - Flip the active flag.
pub async fn toggle_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Slide> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.toggle_slide(&id).await {
        Ok(slide) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(slide, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/slides/:id/move - Swap with the neighbouring slide.
pub async fn move_slide(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveSlideRequest>,
) -> ApiResult<Vec<Slide>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.move_slide(&id, request.direction).await {
        Ok(slides) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(slides, new_revision)
        }
        Err(e) => {
            tracing::warn!("Failed to move slide {}: {}", id, e);
            error(e, revision_id)
        }
    }
}

/// DELETE /api/slides/:id - Delete a slide.
pub async fn delete_slide(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_slide(&id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
