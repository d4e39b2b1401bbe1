//! Navigation endpoints: the route table and initial-state resolution.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::auth;
use crate::navigation::{aliases, Location, MemoryHistory, RouterSnapshot, View, ViewRouter};
use crate::AppState;

/// One view with every path that reaches it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub view: View,
    pub canonical_path: &'static str,
    pub aliases: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Path with optional query and hash, e.g. `/?donation=success&session_id=x`
    #[serde(default)]
    pub location: String,
}

/// GET /api/navigation/routes - All views and their paths.
pub async fn list_routes(State(state): State<AppState>) -> ApiResult<Vec<RouteEntry>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let routes = View::ALL
        .iter()
        .map(|&view| RouteEntry {
            view,
            canonical_path: view.canonical_path(),
            aliases: aliases(view).collect(),
        })
        .collect();

    success(routes, revision_id)
}

/// GET /api/navigation/resolve - Router state for a freshly loaded location.
///
/// Deep links are consumed the same way a page load consumes them, so the
/// returned `location` is what the address bar should be replaced with.
pub async fn resolve_location(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResolveQuery>,
) -> ApiResult<RouterSnapshot> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let authenticated = auth::has_session(&headers, state.config.api_psk.as_deref());
    let history = MemoryHistory::new(Location::parse(&query.location));
    let router = ViewRouter::start(history, authenticated);

    success(router.snapshot(), revision_id)
}
