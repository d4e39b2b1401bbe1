//! Root view controller.
//!
//! Keeps the active [`View`] in sync with the location bar in both
//! directions. In-app navigation pushes history entries; back/forward only
//! re-resolves. Deep links (admin hash, payment return parameters) are
//! consumed once and then stripped with `replace`, so reloading the page does
//! not fire them again.

use serde::Serialize;

use super::{routes, History, Location, NavigationIntent, View};
use crate::carousel::SlideAction;

/// Hash fragments that open the admin console.
pub const ADMIN_HASHES: [&str; 3] = ["admin", "painel", "administracao"];

/// Query parameter set by the payment provider on redirect back to the site.
pub const DONATION_PARAM: &str = "donation";
pub const SESSION_ID_PARAM: &str = "session_id";

/// Modal layered on top of the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    #[default]
    None,
    AdminPanel,
    LoginPrompt,
}

/// Browser-originated location changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationEvent {
    /// Back/forward (`popstate`).
    PopState,
    /// Fragment edited in place (`hashchange`).
    HashChange,
}

/// Outcome of a payment redirect, read from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationReturn {
    Success { session_id: String },
    Failed,
}

impl DonationReturn {
    pub fn from_location(location: &Location) -> Option<Self> {
        match location.query_param(DONATION_PARAM)?.as_str() {
            "success" => location
                .query_param(SESSION_ID_PARAM)
                .filter(|id| !id.is_empty())
                .map(|session_id| Self::Success { session_id }),
            "cancelled" | "error" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Serializable view of the router state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterSnapshot {
    pub view: View,
    pub path: &'static str,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_session_id: Option<String>,
    pub overlay: Overlay,
    pub authenticated: bool,
}

/// Owns the current view and the history it mirrors.
#[derive(Debug)]
pub struct ViewRouter<H: History> {
    history: H,
    view: View,
    hint: Option<String>,
    donation_session_id: Option<String>,
    overlay: Overlay,
    has_session: bool,
}

impl<H: History> ViewRouter<H> {
    /// Resolve the initial state from the current location. Runs once, before
    /// any user interaction.
    pub fn start(history: H, has_session: bool) -> Self {
        let view = routes::resolve_view_from_path(&history.location().path);
        let mut router = Self {
            history,
            view,
            hint: None,
            donation_session_id: None,
            overlay: Overlay::None,
            has_session,
        };

        router.consume_donation_return();
        router.consume_admin_hash();

        tracing::debug!(view = %router.view, "Router started");
        router
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn donation_session_id(&self) -> Option<&str> {
        self.donation_session_id.as_deref()
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn has_session(&self) -> bool {
        self.has_session
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Write the canonical path for `view` as a new history entry.
    pub fn push_view(&mut self, view: View) {
        self.history.push(Location::from_path(view.canonical_path()));
    }

    /// In-app navigation.
    pub fn navigate(&mut self, view: View) {
        self.view = view;
        self.hint = None;
        self.push_view(view);
        tracing::debug!(view = %view, "Navigated");
    }

    /// In-app navigation to a specific item inside `view`.
    pub fn navigate_with_hint(&mut self, view: View, hint: impl Into<String>) {
        self.navigate(view);
        self.hint = Some(hint.into());
    }

    /// Execute a slide call-to-action. Returns the URL to open externally,
    /// if that is what the action asks for.
    pub fn follow(&mut self, action: &SlideAction) -> Option<String> {
        match NavigationIntent::from_action(action)? {
            NavigationIntent::Open { view, hint: Some(hint) } => {
                self.navigate_with_hint(view, hint);
                None
            }
            NavigationIntent::Open { view, hint: None } => {
                self.navigate(view);
                None
            }
            NavigationIntent::External { url } => Some(url),
        }
    }

    /// React to a browser-originated location change. Never pushes history.
    pub fn handle(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::PopState => {
                self.view = routes::resolve_view_from_path(&self.history.location().path);
                self.hint = None;
                self.consume_donation_return();
                tracing::debug!(view = %self.view, "History traversal");
            }
            LocationEvent::HashChange => self.consume_admin_hash(),
        }
    }

    /// Session presence changed (login, logout, token refresh).
    pub fn set_session(&mut self, present: bool) {
        self.has_session = present;
        self.consume_admin_hash();
    }

    /// Admin entry point outside of deep links (footer button).
    pub fn request_admin(&mut self) {
        self.overlay = if self.has_session {
            Overlay::AdminPanel
        } else {
            Overlay::LoginPrompt
        };
    }

    pub fn login_succeeded(&mut self) {
        self.has_session = true;
        self.overlay = Overlay::AdminPanel;
    }

    pub fn close_admin(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn snapshot(&self) -> RouterSnapshot {
        RouterSnapshot {
            view: self.view,
            path: self.view.canonical_path(),
            location: self.history.location().to_string(),
            hint: self.hint.clone(),
            donation_session_id: self.donation_session_id.clone(),
            overlay: self.overlay,
            authenticated: self.has_session,
        }
    }

    fn consume_admin_hash(&mut self) {
        let location = self.history.location();
        if !ADMIN_HASHES.contains(&location.hash.as_str()) {
            return;
        }

        self.request_admin();
        self.history.replace(Location::from_path(&location.path));
        tracing::debug!(overlay = ?self.overlay, "Admin deep link consumed");
    }

    fn consume_donation_return(&mut self) {
        let location = self.history.location();
        let Some(outcome) = DonationReturn::from_location(&location) else {
            return;
        };

        match outcome {
            DonationReturn::Success { session_id } => {
                self.view = View::DonationSuccess;
                self.donation_session_id = Some(session_id);
            }
            DonationReturn::Failed => {
                self.view = View::DonationError;
            }
        }
        self.hint = None;
        self.history
            .replace(location.without_query_params(&[DONATION_PARAM, SESSION_ID_PARAM]));
        tracing::info!(view = %self.view, "Donation return consumed");
    }
}
