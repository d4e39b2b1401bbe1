//! Call-to-action resolution for slides.

use serde::Serialize;
use url::Url;

use crate::models::{ContentType, ReferenceKind, Slide, SlideTarget};
use crate::navigation::View;

/// What activating a slide's button does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideAction {
    /// Nothing to do; the button is not rendered.
    None,
    /// Open an absolute URL in a new browsing context.
    OpenExternal { url: String },
    /// Navigate inside the site to a route (leading `/` already stripped).
    NavigateRoute { route: String },
    /// Navigate to the view listing the referenced record.
    NavigateView { view: View, hint: String },
}

/// Resolve the action for a slide. Pure: reads only the slide's fields.
pub fn resolve_action(slide: &Slide) -> SlideAction {
    resolve_target(&slide.target)
}

pub fn resolve_target(target: &SlideTarget) -> SlideAction {
    match target {
        SlideTarget::Custom { link_url: None } => SlideAction::None,
        SlideTarget::Custom {
            link_url: Some(link),
        }
        | SlideTarget::InternalPage { link_url: link } => link_action(link),
        SlideTarget::BlogPost { related_content_id } => {
            reference_action(ReferenceKind::BlogPost, related_content_id)
        }
        SlideTarget::Announcement { related_content_id } => {
            reference_action(ReferenceKind::Announcement, related_content_id)
        }
        SlideTarget::Event { related_content_id } => {
            reference_action(ReferenceKind::Event, related_content_id)
        }
    }
}

fn reference_action(kind: ReferenceKind, id: &str) -> SlideAction {
    SlideAction::NavigateView {
        view: kind.view(),
        hint: id.to_string(),
    }
}

fn link_action(link: &str) -> SlideAction {
    if is_external(link) {
        SlideAction::OpenExternal {
            url: link.to_string(),
        }
    } else {
        SlideAction::NavigateRoute {
            route: link.strip_prefix('/').unwrap_or(link).to_string(),
        }
    }
}

/// Absolute `http(s)` URL.
pub fn is_external(link: &str) -> bool {
    Url::parse(link).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Whether the slide renders a call-to-action button at all.
pub fn has_action(slide: &Slide) -> bool {
    !matches!(resolve_action(slide), SlideAction::None)
}

/// Button label used when a slide has no `link_text` of its own.
pub fn default_link_text(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Custom | ContentType::InternalPage => "Saiba mais",
        ContentType::BlogPost => "Ler mensagem",
        ContentType::Announcement => "Ver aviso",
        ContentType::Event => "Ver horários",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(target: SlideTarget) -> Slide {
        Slide {
            id: "s1".to_string(),
            title: "Título".to_string(),
            description: "Descrição".to_string(),
            image_url: String::new(),
            link_text: None,
            target,
            media_public_id: None,
            order_index: 0,
            is_active: true,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_custom_without_link_is_noop() {
        let s = slide(SlideTarget::Custom { link_url: None });
        assert_eq!(resolve_action(&s), SlideAction::None);
        assert!(!has_action(&s));
    }

    #[test]
    fn test_custom_external_link() {
        let s = slide(SlideTarget::Custom {
            link_url: Some("https://example.org".to_string()),
        });
        assert_eq!(
            resolve_action(&s),
            SlideAction::OpenExternal {
                url: "https://example.org".to_string()
            }
        );
    }

    #[test]
    fn test_internal_links_strip_leading_slash() {
        let s = slide(SlideTarget::InternalPage {
            link_url: "/capela".to_string(),
        });
        assert_eq!(
            resolve_action(&s),
            SlideAction::NavigateRoute {
                route: "capela".to_string()
            }
        );

        let s = slide(SlideTarget::Custom {
            link_url: Some("missas".to_string()),
        });
        assert_eq!(
            resolve_action(&s),
            SlideAction::NavigateRoute {
                route: "missas".to_string()
            }
        );
    }

    #[test]
    fn test_internal_page_with_external_link() {
        let s = slide(SlideTarget::InternalPage {
            link_url: "HTTP://paroquia.example.org/agenda".to_string(),
        });
        assert!(matches!(resolve_action(&s), SlideAction::OpenExternal { .. }));
    }

    #[test]
    fn test_references() {
        let s = slide(SlideTarget::Announcement {
            related_content_id: "xyz".to_string(),
        });
        assert_eq!(
            resolve_action(&s),
            SlideAction::NavigateView {
                view: View::Announcements,
                hint: "xyz".to_string()
            }
        );

        let s = slide(SlideTarget::BlogPost {
            related_content_id: "p1".to_string(),
        });
        assert!(matches!(
            resolve_action(&s),
            SlideAction::NavigateView { view: View::Blog, .. }
        ));

        let s = slide(SlideTarget::Event {
            related_content_id: "c1".to_string(),
        });
        assert!(matches!(
            resolve_action(&s),
            SlideAction::NavigateView {
                view: View::Celebrations,
                ..
            }
        ));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let s = slide(SlideTarget::Custom {
            link_url: Some("/doacao".to_string()),
        });
        let first = resolve_action(&s);
        for _ in 0..10 {
            assert_eq!(resolve_action(&s), first);
        }
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("http://a"));
        assert!(is_external("https://a"));
        assert!(!is_external("/https"));
        assert!(!is_external("httpfoo"));
        assert!(!is_external("mailto:x@y"));
        assert!(!is_external("ação"));
        assert!(is_external("HTTPS://Paroquia.example.org/doe"));
        assert!(!is_external("http://"));
        assert!(!is_external("ftp://files.example.org"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(SlideAction::NavigateView {
            view: View::Blog,
            hint: "p1".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "navigate_view");
        assert_eq!(json["view"], "blog");
        assert_eq!(json["hint"], "p1");
    }
}
