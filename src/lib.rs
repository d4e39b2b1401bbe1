//! Parish Site Backend
//!
//! REST backend for the parish website: slide administration, the homepage
//! carousel, view routing with deep links, and donation return pages.

pub mod api;
pub mod auth;
pub mod carousel;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod navigation;
pub mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;
use storage::{MediaStore, MAX_UPLOAD_BODY_BYTES, MEDIA_ROUTE};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub media: Arc<MediaStore>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // Admin console routes
    let admin_routes = Router::new()
        // Slides
        .route("/slides", get(api::list_slides).post(api::create_slide))
        .route(
            "/slides/{id}",
            get(api::get_slide)
                .put(api::update_slide)
                .delete(api::delete_slide),
        )
        .route("/slides/{id}/toggle", post(api::toggle_slide))
        .route("/slides/{id}/move", post(api::move_slide))
        // Uploads
        .route(
            "/uploads/slides",
            post(api::upload_slide_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        // Reference pickers
        .route("/content/options", get(api::list_content_options))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Public site routes
    let public_routes = Router::new()
        .route("/session", get(api::get_session))
        .route("/revision", get(api::get_revision))
        .route("/navigation/routes", get(api::list_routes))
        .route("/navigation/resolve", get(api::resolve_location))
        .route("/carousel", get(api::get_carousel))
        .route("/donations/{session_id}", get(api::get_donation))
        .route("/donations/{session_id}/receipt", get(api::get_receipt))
        .route("/settings/donation", get(api::get_donation_settings));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    let media = ServeDir::new(state.media.root());

    Router::new()
        .nest("/api", admin_routes.merge(public_routes))
        .nest_service(MEDIA_ROUTE, media)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
