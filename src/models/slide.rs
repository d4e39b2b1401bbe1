//! Homepage slide model.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::navigation::View;

/// Content-type tag stored alongside each slide.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Custom,
    InternalPage,
    BlogPost,
    Announcement,
    Event,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Custom => "custom",
            ContentType::InternalPage => "internal_page",
            ContentType::BlogPost => "blog_post",
            ContentType::Announcement => "announcement",
            ContentType::Event => "event",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "custom" => Some(ContentType::Custom),
            "internal_page" => Some(ContentType::InternalPage),
            "blog_post" => Some(ContentType::BlogPost),
            "announcement" => Some(ContentType::Announcement),
            "event" => Some(ContentType::Event),
            _ => None,
        }
    }

    /// The reference kind for content types that point at another record.
    pub fn reference_kind(&self) -> Option<ReferenceKind> {
        match self {
            ContentType::Custom | ContentType::InternalPage => None,
            ContentType::BlogPost => Some(ReferenceKind::BlogPost),
            ContentType::Announcement => Some(ReferenceKind::Announcement),
            ContentType::Event => Some(ReferenceKind::Event),
        }
    }
}

/// Kind of record a slide can reference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    BlogPost,
    Announcement,
    Event,
}

impl ReferenceKind {
    /// View that lists records of this kind.
    pub fn view(&self) -> View {
        match self {
            ReferenceKind::BlogPost => View::Blog,
            ReferenceKind::Announcement => View::Announcements,
            ReferenceKind::Event => View::Celebrations,
        }
    }
}

/// Where a slide's call-to-action points.
///
/// Serialized flat into the slide with `contentType` as the tag, so a
/// reference id can never coexist with a link-based content type.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "contentType", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SlideTarget {
    Custom {
        #[serde(skip_serializing_if = "Option::is_none")]
        link_url: Option<String>,
    },
    InternalPage {
        link_url: String,
    },
    BlogPost {
        related_content_id: String,
    },
    Announcement {
        related_content_id: String,
    },
    Event {
        related_content_id: String,
    },
}

impl SlideTarget {
    /// Build a target from loose editor fields, rejecting combinations that
    /// do not fit the content type.
    pub fn compose(
        content_type: ContentType,
        link_url: Option<String>,
        related_content_id: Option<String>,
    ) -> Result<Self, AppError> {
        let link_url = non_empty(link_url);
        let related_content_id = non_empty(related_content_id);

        match content_type.reference_kind() {
            None => {
                if related_content_id.is_some() {
                    return Err(AppError::Validation(format!(
                        "relatedContentId is not allowed for {} slides",
                        content_type.as_str()
                    )));
                }
                match content_type {
                    ContentType::InternalPage => link_url
                        .map(|link_url| SlideTarget::InternalPage { link_url })
                        .ok_or_else(|| {
                            AppError::Validation(
                                "linkUrl is required for internal_page slides".to_string(),
                            )
                        }),
                    _ => Ok(SlideTarget::Custom { link_url }),
                }
            }
            Some(kind) => {
                if link_url.is_some() {
                    return Err(AppError::Validation(format!(
                        "linkUrl is not allowed for {} slides",
                        content_type.as_str()
                    )));
                }
                let id = related_content_id.ok_or_else(|| {
                    AppError::Validation(format!(
                        "relatedContentId is required for {} slides",
                        content_type.as_str()
                    ))
                })?;
                Ok(SlideTarget::reference(kind, id))
            }
        }
    }

    /// Rebuild from stored columns. Rows that do not satisfy their content
    /// type degrade to a link-less custom slide.
    pub fn from_columns(
        content_type: &str,
        link_url: Option<String>,
        related_content_id: Option<String>,
    ) -> Self {
        let content_type = ContentType::parse(content_type).unwrap_or(ContentType::Custom);
        match content_type {
            ContentType::Custom => SlideTarget::Custom {
                link_url: non_empty(link_url),
            },
            _ => SlideTarget::compose(content_type, None, related_content_id)
                .or_else(|_| SlideTarget::compose(content_type, link_url, None))
                .unwrap_or_else(|e| {
                    tracing::warn!("Stored slide target is inconsistent: {}", e);
                    SlideTarget::Custom { link_url: None }
                }),
        }
    }

    pub fn reference(kind: ReferenceKind, id: String) -> Self {
        match kind {
            ReferenceKind::BlogPost => SlideTarget::BlogPost {
                related_content_id: id,
            },
            ReferenceKind::Announcement => SlideTarget::Announcement {
                related_content_id: id,
            },
            ReferenceKind::Event => SlideTarget::Event {
                related_content_id: id,
            },
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            SlideTarget::Custom { .. } => ContentType::Custom,
            SlideTarget::InternalPage { .. } => ContentType::InternalPage,
            SlideTarget::BlogPost { .. } => ContentType::BlogPost,
            SlideTarget::Announcement { .. } => ContentType::Announcement,
            SlideTarget::Event { .. } => ContentType::Event,
        }
    }

    pub fn link_url(&self) -> Option<&str> {
        match self {
            SlideTarget::Custom { link_url } => link_url.as_deref(),
            SlideTarget::InternalPage { link_url } => Some(link_url),
            _ => None,
        }
    }

    pub fn related_content_id(&self) -> Option<&str> {
        match self {
            SlideTarget::BlogPost { related_content_id }
            | SlideTarget::Announcement { related_content_id }
            | SlideTarget::Event { related_content_id } => Some(related_content_id),
            _ => None,
        }
    }
}

impl Default for SlideTarget {
    fn default() -> Self {
        SlideTarget::Custom { link_url: None }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A promotional slide on the homepage carousel.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Button label for the call-to-action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    #[serde(flatten)]
    pub target: SlideTarget,
    /// Identifier of the image at an external media host, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_public_id: Option<String>,
    pub order_index: i64,
    pub is_active: bool,
    pub created_at: String,
}

impl Slide {
    /// Display order key: ordering index, then creation time, then id.
    pub fn order_key(&self) -> (i64, &str, &str) {
        (self.order_index, &self.created_at, &self.id)
    }
}

/// Request body for creating a slide.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default = "default_content_type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub related_content_id: Option<String>,
    #[serde(default)]
    pub media_public_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_content_type() -> ContentType {
    ContentType::Custom
}

fn default_active() -> bool {
    true
}

impl CreateSlideRequest {
    /// Check required fields and build the call-to-action target.
    pub fn validate(&self) -> Result<SlideTarget, AppError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(AppError::Validation(
                "Title and description are required".to_string(),
            ));
        }
        SlideTarget::compose(
            self.content_type,
            self.link_url.clone(),
            self.related_content_id.clone(),
        )
    }
}

/// Request body for updating a slide. Absent fields keep their value.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlideRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub related_content_id: Option<String>,
    #[serde(default)]
    pub media_public_id: Option<String>,
    #[serde(default)]
    pub order_index: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateSlideRequest {
    /// Merge onto `existing`, validating the result.
    pub fn apply(&self, existing: &Slide) -> Result<Slide, AppError> {
        let title = self.title.clone().unwrap_or_else(|| existing.title.clone());
        let description = self
            .description
            .clone()
            .unwrap_or_else(|| existing.description.clone());
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::Validation(
                "Title and description are required".to_string(),
            ));
        }

        let target = if self.content_type.is_none()
            && self.link_url.is_none()
            && self.related_content_id.is_none()
        {
            existing.target.clone()
        } else {
            let content_type = self
                .content_type
                .unwrap_or_else(|| existing.target.content_type());
            // Only inherit fields that still make sense for the content type.
            let (link_url, related_content_id) = match content_type.reference_kind() {
                None => (
                    self.link_url
                        .clone()
                        .or_else(|| existing.target.link_url().map(str::to_string)),
                    self.related_content_id.clone(),
                ),
                Some(_) => (
                    self.link_url.clone(),
                    self.related_content_id
                        .clone()
                        .or_else(|| existing.target.related_content_id().map(str::to_string)),
                ),
            };
            SlideTarget::compose(content_type, link_url, related_content_id)?
        };

        Ok(Slide {
            id: existing.id.clone(),
            title,
            description,
            image_url: self
                .image_url
                .clone()
                .unwrap_or_else(|| existing.image_url.clone()),
            link_text: self.link_text.clone().or_else(|| existing.link_text.clone()),
            target,
            media_public_id: self
                .media_public_id
                .clone()
                .or_else(|| existing.media_public_id.clone()),
            order_index: self.order_index.unwrap_or(existing.order_index),
            is_active: self.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at.clone(),
        })
    }
}

/// Direction for swapping a slide with its neighbour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Request body for reordering a slide.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlideRequest {
    pub direction: MoveDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(target: SlideTarget) -> Slide {
        Slide {
            id: "s1".to_string(),
            title: "Festa".to_string(),
            description: "Festa de São Miguel".to_string(),
            image_url: "https://cdn.example.org/festa.jpg".to_string(),
            link_text: None,
            target,
            media_public_id: None,
            order_index: 0,
            is_active: true,
            created_at: "2024-09-29T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_compose_custom() {
        let target = SlideTarget::compose(
            ContentType::Custom,
            Some(" https://example.org ".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(
            target,
            SlideTarget::Custom {
                link_url: Some("https://example.org".to_string())
            }
        );

        let empty = SlideTarget::compose(ContentType::Custom, Some("".to_string()), None).unwrap();
        assert_eq!(empty, SlideTarget::Custom { link_url: None });
    }

    #[test]
    fn test_compose_rejects_conflicts() {
        assert!(matches!(
            SlideTarget::compose(ContentType::Custom, None, Some("abc".to_string())),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            SlideTarget::compose(
                ContentType::BlogPost,
                Some("/blog".to_string()),
                Some("abc".to_string())
            ),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            SlideTarget::compose(ContentType::InternalPage, None, None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            SlideTarget::compose(ContentType::Event, None, Some("  ".to_string())),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_from_columns() {
        assert_eq!(
            SlideTarget::from_columns("announcement", Some("/eventos".to_string()), Some("xyz".to_string())),
            SlideTarget::Announcement {
                related_content_id: "xyz".to_string()
            }
        );
        assert_eq!(
            SlideTarget::from_columns("blog_post", None, None),
            SlideTarget::Custom { link_url: None }
        );
        assert_eq!(
            SlideTarget::from_columns("mystery", Some("/capela".to_string()), None),
            SlideTarget::Custom {
                link_url: Some("/capela".to_string())
            }
        );
    }

    #[test]
    fn test_slide_serializes_flat() {
        let json = serde_json::to_value(slide(SlideTarget::Announcement {
            related_content_id: "xyz".to_string(),
        }))
        .unwrap();
        assert_eq!(json["contentType"], "announcement");
        assert_eq!(json["relatedContentId"], "xyz");
        assert_eq!(json["orderIndex"], 0);
        assert_eq!(json["isActive"], true);
        assert!(json.get("linkUrl").is_none());
    }

    #[test]
    fn test_create_request_validation() {
        let request: CreateSlideRequest = serde_json::from_value(serde_json::json!({
            "title": "  ",
            "description": "x"
        }))
        .unwrap();
        assert!(request.validate().is_err());

        let request: CreateSlideRequest = serde_json::from_value(serde_json::json!({
            "title": "Missa",
            "description": "Horários",
            "contentType": "event",
            "relatedContentId": "cel-1"
        }))
        .unwrap();
        assert_eq!(
            request.validate().unwrap(),
            SlideTarget::Event {
                related_content_id: "cel-1".to_string()
            }
        );
        assert!(request.is_active);
    }

    #[test]
    fn test_update_switching_type_drops_stale_fields() {
        let existing = slide(SlideTarget::Custom {
            link_url: Some("https://example.org".to_string()),
        });
        let update = UpdateSlideRequest {
            content_type: Some(ContentType::BlogPost),
            related_content_id: Some("post-9".to_string()),
            ..Default::default()
        };
        let updated = update.apply(&existing).unwrap();
        assert_eq!(
            updated.target,
            SlideTarget::BlogPost {
                related_content_id: "post-9".to_string()
            }
        );

        let back = UpdateSlideRequest {
            content_type: Some(ContentType::InternalPage),
            link_url: Some("/capela".to_string()),
            ..Default::default()
        };
        assert_eq!(
            back.apply(&updated).unwrap().target,
            SlideTarget::InternalPage {
                link_url: "/capela".to_string()
            }
        );
    }

    #[test]
    fn test_update_keeps_untouched_fields() {
        let existing = slide(SlideTarget::Event {
            related_content_id: "cel-1".to_string(),
        });
        let update = UpdateSlideRequest {
            title: Some("Novo título".to_string()),
            ..Default::default()
        };
        let updated = update.apply(&existing).unwrap();
        assert_eq!(updated.title, "Novo título");
        assert_eq!(updated.target, existing.target);
        assert_eq!(updated.created_at, existing.created_at);
    }

    #[test]
    fn test_reference_kind_views() {
        assert_eq!(ReferenceKind::BlogPost.view(), View::Blog);
        assert_eq!(ReferenceKind::Announcement.view(), View::Announcements);
        assert_eq!(ReferenceKind::Event.view(), View::Celebrations);
    }
}
