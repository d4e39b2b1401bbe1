//! The closed set of screens the site can show.

use serde::{Deserialize, Serialize};

/// One named screen of the site. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    History,
    Priests,
    Photos,
    Albums,
    FullGallery,
    Timeline,
    Blog,
    Announcements,
    Contact,
    Pastorals,
    Celebrations,
    Capela,
    CapelaDonate,
    DonationSuccess,
    DonationError,
    PrivacyPolicy,
    TermsOfUse,
}

impl View {
    pub const ALL: [View; 18] = [
        View::Home,
        View::History,
        View::Priests,
        View::Photos,
        View::Albums,
        View::FullGallery,
        View::Timeline,
        View::Blog,
        View::Announcements,
        View::Contact,
        View::Pastorals,
        View::Celebrations,
        View::Capela,
        View::CapelaDonate,
        View::DonationSuccess,
        View::DonationError,
        View::PrivacyPolicy,
        View::TermsOfUse,
    ];

    /// The single outbound path written to the location bar for this view.
    pub fn canonical_path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Blog => "/blog",
            View::CapelaDonate => "/doacao",
            View::DonationSuccess => "/doacao-sucesso",
            View::DonationError => "/doacao-erro",
            View::History => "/historia",
            View::Contact => "/contato",
            View::Pastorals => "/pastorais",
            View::Celebrations => "/celebracoes",
            View::Photos => "/fotos",
            View::Albums => "/albuns",
            View::FullGallery => "/galeria-completa",
            View::Timeline => "/linha-do-tempo",
            View::Capela => "/capela",
            View::Priests => "/clero",
            View::Announcements => "/eventos",
            View::PrivacyPolicy => "/politica-de-privacidade",
            View::TermsOfUse => "/termos-de-uso",
        }
    }

    /// Identifier used by in-app links (`"full-gallery"`, `"capela"`).
    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::History => "history",
            View::Priests => "priests",
            View::Photos => "photos",
            View::Albums => "albums",
            View::FullGallery => "full-gallery",
            View::Timeline => "timeline",
            View::Blog => "blog",
            View::Announcements => "announcements",
            View::Contact => "contact",
            View::Pastorals => "pastorals",
            View::Celebrations => "celebrations",
            View::Capela => "capela",
            View::CapelaDonate => "capela-donate",
            View::DonationSuccess => "donation-success",
            View::DonationError => "donation-error",
            View::PrivacyPolicy => "privacy-policy",
            View::TermsOfUse => "terms-of-use",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        View::ALL.into_iter().find(|view| view.as_str() == name)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_name(view.as_str()), Some(view));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(View::from_name("sacristy"), None);
        assert_eq!(View::from_name(""), None);
    }

    #[test]
    fn test_serde_matches_name() {
        for view in View::ALL {
            let json = serde_json::to_value(view).unwrap();
            assert_eq!(json, view.as_str());
        }
    }

    #[test]
    fn test_canonical_paths_are_unique() {
        let mut paths: Vec<_> = View::ALL.iter().map(|v| v.canonical_path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), View::ALL.len());
    }
}
