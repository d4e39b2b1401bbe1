//! Admin session probe.

use axum::{extract::State, http::HeaderMap};
use serde::Serialize;

use super::{success, ApiResult};
use crate::auth;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// GET /api/session - Whether the caller holds an admin session.
pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<SessionStatus> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    let authenticated = auth::has_session(&headers, state.config.api_psk.as_deref());
    success(SessionStatus { authenticated }, revision_id)
}
