//! Turns a slide call-to-action into something the router can execute.

use serde::Serialize;

use super::{routes, View};
use crate::carousel::SlideAction;

/// What the router should do after a call-to-action fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationIntent {
    /// Switch to `view`, optionally telling it which item to focus.
    Open { view: View, hint: Option<String> },
    /// Open `url` in a new browsing context; the site state does not change.
    External { url: String },
}

impl NavigationIntent {
    pub fn from_action(action: &SlideAction) -> Option<Self> {
        match action {
            SlideAction::None => None,
            SlideAction::OpenExternal { url } => Some(Self::External { url: url.clone() }),
            SlideAction::NavigateRoute { route } => Some(Self::Open {
                view: view_for_route(route),
                hint: None,
            }),
            SlideAction::NavigateView { view, hint } => Some(Self::Open {
                view: *view,
                hint: Some(hint.clone()),
            }),
        }
    }
}

/// Resolve an internal link target. Links written as view names (`capela`)
/// win; anything else is treated as a path (`missas` -> `/missas`).
pub fn view_for_route(route: &str) -> View {
    let route = route.trim_start_matches('/');
    View::from_name(route).unwrap_or_else(|| routes::resolve_view_from_path(&format!("/{route}")))
}
