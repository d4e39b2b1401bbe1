//! Location bar value: path, query string and hash fragment.

use serde::Serialize;
use url::{form_urlencoded, Url};

/// Origin that relative locations are resolved against. Only the path,
/// query and fragment of the result are kept.
const LOCATION_BASE: &str = "http://site.invalid/";

/// A parsed location such as `/capela?donation=success&session_id=abc#admin`.
///
/// `query` and `hash` are stored without their leading `?` / `#`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub path: String,
    pub query: String,
    pub hash: String,
}

impl Location {
    /// Parse a location bar value. Unparseable input falls back to `/`.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(LOCATION_BASE).and_then(|base| base.join(raw)) {
            Ok(url) => Self::from(&url),
            Err(e) => {
                tracing::warn!("Unparseable location {:?}: {}", raw, e);
                Self {
                    path: "/".to_string(),
                    ..Self::default()
                }
            }
        }
    }

    pub fn from_path(path: &str) -> Self {
        Self::parse(path)
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        form_urlencoded::parse(self.query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Copy of this location with the named query parameters removed.
    ///
    /// Unrelated parameters and the hash are kept.
    pub fn without_query_params(&self, names: &[&str]) -> Self {
        let kept: Vec<_> = form_urlencoded::parse(self.query.as_bytes())
            .filter(|(key, _)| !names.iter().any(|name| key == name))
            .collect();

        let query = if kept.is_empty() {
            String::new()
        } else {
            form_urlencoded::Serializer::new(String::new())
                .extend_pairs(kept)
                .finish()
        };

        Self {
            path: self.path.clone(),
            query,
            hash: self.hash.clone(),
        }
    }
}

impl From<&Url> for Location {
    fn from(url: &Url) -> Self {
        Self {
            path: url.path().to_string(),
            query: url.query().unwrap_or_default().to_string(),
            hash: url.fragment().unwrap_or_default().to_string(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.hash.is_empty() {
            write!(f, "#{}", self.hash)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_location() {
        let loc = Location::parse("/capela?donation=success&session_id=abc123#admin");
        assert_eq!(loc.path, "/capela");
        assert_eq!(loc.query, "donation=success&session_id=abc123");
        assert_eq!(loc.hash, "admin");
    }

    #[test]
    fn test_parse_empty_path_defaults_to_root() {
        let loc = Location::parse("?donation=error");
        assert_eq!(loc.path, "/");
        assert_eq!(loc.query, "donation=error");
        assert_eq!(Location::parse("").path, "/");
    }

    #[test]
    fn test_question_mark_inside_hash_is_not_a_query() {
        let loc = Location::parse("/blog#section?x=1");
        assert_eq!(loc.path, "/blog");
        assert_eq!(loc.query, "");
        assert_eq!(loc.hash, "section?x=1");
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["/", "/blog", "/a?b=c", "/a#h", "/a?b=c#h"] {
            assert_eq!(Location::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_query_param_decoding() {
        let loc = Location::parse("/?session_id=cs%5Ftest%20one&name=a+b&flag");
        assert_eq!(loc.query_param("session_id").as_deref(), Some("cs_test one"));
        assert_eq!(loc.query_param("name").as_deref(), Some("a b"));
        assert_eq!(loc.query_param("flag").as_deref(), Some(""));
        assert_eq!(loc.query_param("missing"), None);
    }

    #[test]
    fn test_malformed_escape_kept() {
        let loc = Location::parse("/?q=100%&r=%zz");
        assert_eq!(loc.query_param("q").as_deref(), Some("100%"));
        assert_eq!(loc.query_param("r").as_deref(), Some("%zz"));
    }

    #[test]
    fn test_without_query_params_keeps_hash_and_others() {
        let loc = Location::parse("/?utm=x&donation=success&session_id=abc#top");
        let cleaned = loc.without_query_params(&["donation", "session_id"]);
        assert_eq!(cleaned.to_string(), "/?utm=x#top");

        let again = cleaned.without_query_params(&["donation", "session_id"]);
        assert_eq!(again, cleaned);
    }

    #[test]
    fn test_parse_normalizes_path() {
        assert_eq!(Location::parse("/fotos/../doacao").path, "/doacao");
        assert_eq!(Location::parse("doacao").path, "/doacao");
        assert_eq!(Location::parse("//other.example/blog?x=1").to_string(), "/blog?x=1");
    }
}
