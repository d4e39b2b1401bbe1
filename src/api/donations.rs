//! Donation return pages: details, receipt and chapel contact settings.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use super::{error, success, ApiResult};
use crate::errors::{AppError, AppErrorWithRevision};
use crate::models::{Donation, DonationSettings};
use crate::AppState;

/// GET /api/donations/:session_id - Donation recorded for a checkout session.
pub async fn get_donation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Donation> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.find_donation(&session_id).await {
        Ok(Some(donation)) => success(donation, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("No donation for session {}", session_id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/donations/:session_id/receipt - Plain-text receipt download.
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, AppErrorWithRevision> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let donation = match state.repo.find_donation(&session_id).await {
        Ok(Some(donation)) => donation,
        Ok(None) => {
            return Err(AppErrorWithRevision {
                error: AppError::NotFound(format!("No donation for session {}", session_id)),
                revision_id,
            })
        }
        Err(e) => return Err(AppErrorWithRevision { error: e, revision_id }),
    };

    let disposition = format!("attachment; filename=\"comprovante-doacao-{}.txt\"", donation.id);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        donation.receipt(),
    )
        .into_response())
}

/// GET /api/settings/donation - Thanks message and chapel contact.
pub async fn get_donation_settings(State(state): State<AppState>) -> ApiResult<DonationSettings> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.donation_settings().await {
        Ok(settings) => success(settings, revision_id),
        Err(e) => {
            tracing::warn!("Failed to load donation settings, using defaults: {}", e);
            success(DonationSettings::default(), revision_id)
        }
    }
}
