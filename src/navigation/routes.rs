//! Inbound path table.
//!
//! Many paths (Portuguese and English aliases) map to one view. The reverse
//! direction lives in [`View::canonical_path`].

use super::View;

/// Static `path -> view` associations.
pub const ROUTES: &[(&str, View)] = &[
    ("/", View::Home),
    ("/home", View::Home),
    ("/inicio", View::Home),
    ("/blog", View::Blog),
    ("/mensagem", View::Blog),
    ("/mensagem-de-fe", View::Blog),
    ("/doacao", View::CapelaDonate),
    ("/doacoes", View::CapelaDonate),
    ("/capela-doacao", View::CapelaDonate),
    ("/donate", View::CapelaDonate),
    ("/donation", View::CapelaDonate),
    ("/doacao-sucesso", View::DonationSuccess),
    ("/doacao-erro", View::DonationError),
    ("/historia", View::History),
    ("/history", View::History),
    ("/nossa-historia", View::History),
    ("/contato", View::Contact),
    ("/contact", View::Contact),
    ("/fale-conosco", View::Contact),
    ("/pastorais", View::Pastorals),
    ("/pastorals", View::Pastorals),
    ("/grupos", View::Pastorals),
    ("/celebracoes", View::Celebrations),
    ("/celebrations", View::Celebrations),
    ("/missas", View::Celebrations),
    ("/horarios", View::Celebrations),
    ("/fotos", View::Photos),
    ("/photos", View::Photos),
    ("/galeria", View::Photos),
    ("/gallery", View::Photos),
    ("/albuns", View::Albums),
    ("/albums", View::Albums),
    ("/galeria-completa", View::FullGallery),
    ("/full-gallery", View::FullGallery),
    ("/linha-do-tempo", View::Timeline),
    ("/timeline", View::Timeline),
    ("/historia-completa", View::Timeline),
    ("/capela", View::Capela),
    ("/chapel", View::Capela),
    ("/sao-miguel", View::Capela),
    ("/clero", View::Priests),
    ("/priests", View::Priests),
    ("/padres", View::Priests),
    ("/eventos", View::Announcements),
    ("/events", View::Announcements),
    ("/avisos", View::Announcements),
    ("/announcements", View::Announcements),
    ("/politica-de-privacidade", View::PrivacyPolicy),
    ("/privacy-policy", View::PrivacyPolicy),
    ("/termos-de-uso", View::TermsOfUse),
    ("/terms-of-use", View::TermsOfUse),
];

/// Look up the view for a path, falling back to [`View::Home`].
pub fn resolve_view_from_path(path: &str) -> View {
    lookup(path).unwrap_or_default()
}

/// Exact table lookup without the fallback.
pub fn lookup(path: &str) -> Option<View> {
    ROUTES
        .iter()
        .find(|(candidate, _)| *candidate == path)
        .map(|(_, view)| *view)
}

/// All inbound paths that resolve to `view`.
pub fn aliases(view: View) -> impl Iterator<Item = &'static str> {
    ROUTES
        .iter()
        .filter(move |(_, v)| *v == view)
        .map(|(path, _)| *path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_resolves_to_its_view() {
        for (path, view) in ROUTES {
            assert_eq!(resolve_view_from_path(path), *view, "path {path}");
        }
    }

    #[test]
    fn test_unknown_paths_fall_back_to_home() {
        for path in ["", "/nope", "/doacao/", "/BLOG", "doacao", "/blog?x=1"] {
            assert_eq!(resolve_view_from_path(path), View::Home, "path {path:?}");
        }
    }

    #[test]
    fn test_canonical_paths_round_trip() {
        for view in View::ALL {
            assert_eq!(resolve_view_from_path(view.canonical_path()), view);
        }
    }

    #[test]
    fn test_donation_path_resolves_to_chapel_donation() {
        assert_eq!(resolve_view_from_path("/doacao"), View::CapelaDonate);
    }

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<_> = ROUTES.iter().map(|(p, _)| *p).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_aliases() {
        let donate: Vec<_> = aliases(View::CapelaDonate).collect();
        assert_eq!(
            donate,
            vec!["/doacao", "/doacoes", "/capela-doacao", "/donate", "/donation"]
        );
    }
}
