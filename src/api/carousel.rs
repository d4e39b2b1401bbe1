//! Public carousel endpoint.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::carousel::{default_link_text, resolve_action, SlideAction, SlideSource};
use crate::models::Slide;
use crate::AppState;

/// A slide as the homepage renders it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSlide {
    #[serde(flatten)]
    pub slide: Slide,
    pub action: SlideAction,
    /// Present only when the button is rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
}

impl From<Slide> for CarouselSlide {
    fn from(slide: Slide) -> Self {
        let action = resolve_action(&slide);
        let link_text = slide
            .link_text
            .as_deref()
            .filter(|text| !text.trim().is_empty());
        // A label alone still renders the button, even with nothing to follow.
        let button_label = match (link_text, &action) {
            (Some(text), _) => Some(text.to_string()),
            (None, SlideAction::None) => None,
            (None, _) => Some(default_link_text(slide.target.content_type()).to_string()),
        };
        Self {
            slide,
            action,
            button_label,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselPayload {
    pub autoplay_interval_ms: u64,
    pub slides: Vec<CarouselSlide>,
}

/// GET /api/carousel - Active slides with resolved actions.
///
/// A store failure yields an empty list so the homepage shows its static
/// welcome block instead.
pub async fn get_carousel(State(state): State<AppState>) -> ApiResult<CarouselPayload> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let slides = state.repo.active_slides().await.unwrap_or_else(|e| {
        tracing::warn!("Carousel fetch failed, serving empty list: {}", e);
        Vec::new()
    });

    success(
        CarouselPayload {
            autoplay_interval_ms: state.config.autoplay_interval.as_millis() as u64,
            slides: slides.into_iter().map(CarouselSlide::from).collect(),
        },
        revision_id,
    )
}
