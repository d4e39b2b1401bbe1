//! Database repository for record store operations.
//!
//! Uses prepared statements; every write bumps the store revision.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    announcement_label, celebration_label, setting_keys, ContentOption, CreateSlideRequest,
    Donation, DonationSettings, MoveDirection, ReferenceKind, RevisionInfo, Slide, SlideTarget,
    UpdateSlideRequest,
};

const SLIDE_COLUMNS: &str = "id, title, description, image_url, link_url, link_text, content_type, related_content_id, media_public_id, order_index, is_active, created_at";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }

    /// Increment the revision ID and return the new value.
    pub async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    // ==================== SLIDE OPERATIONS ====================

    /// List all slides in display order, active or not.
    pub async fn list_slides(&self) -> Result<Vec<Slide>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM slides ORDER BY order_index ASC, created_at ASC, id ASC",
            SLIDE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(slide_from_row).collect())
    }

    /// List active slides in display order (carousel fetch).
    pub async fn list_active_slides(&self) -> Result<Vec<Slide>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM slides WHERE is_active = 1 ORDER BY order_index ASC, created_at ASC, id ASC",
            SLIDE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(slide_from_row).collect())
    }

    /// Get a slide by ID.
    pub async fn get_slide(&self, id: &str) -> Result<Option<Slide>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM slides WHERE id = ?", SLIDE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(slide_from_row))
    }

    /// Create a slide at the end of the display order.
    pub async fn create_slide(
        &self,
        request: &CreateSlideRequest,
        target: SlideTarget,
    ) -> Result<Slide, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let row = sqlx::query("SELECT MAX(order_index) AS max_order FROM slides")
            .fetch_one(&self.pool)
            .await?;
        let order_index = row
            .get::<Option<i64>, _>("max_order")
            .map_or(0, |max| max + 1);

        let slide = Slide {
            id,
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            image_url: request.image_url.clone(),
            link_text: request.link_text.clone(),
            target,
            media_public_id: request.media_public_id.clone(),
            order_index,
            is_active: request.is_active,
            created_at: now,
        };

        sqlx::query(
            "INSERT INTO slides (id, title, description, image_url, link_url, link_text, content_type, related_content_id, media_public_id, order_index, is_active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&slide.id)
        .bind(&slide.title)
        .bind(&slide.description)
        .bind(&slide.image_url)
        .bind(slide.target.link_url())
        .bind(&slide.link_text)
        .bind(slide.target.content_type().as_str())
        .bind(slide.target.related_content_id())
        .bind(&slide.media_public_id)
        .bind(slide.order_index)
        .bind(slide.is_active as i32)
        .bind(&slide.created_at)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(slide)
    }

    /// Update a slide; absent fields keep their stored value.
    pub async fn update_slide(
        &self,
        id: &str,
        request: &UpdateSlideRequest,
    ) -> Result<Slide, AppError> {
        let existing = self
            .get_slide(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Slide {} not found", id)))?;

        let slide = request.apply(&existing)?;

        if slide.order_index != existing.order_index {
            let taken: i64 =
                sqlx::query("SELECT COUNT(*) AS n FROM slides WHERE order_index = ? AND id != ?")
                    .bind(slide.order_index)
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?
                    .get("n");
            if taken > 0 {
                return Err(AppError::Validation(format!(
                    "Order index {} is already used by another slide",
                    slide.order_index
                )));
            }
        }

        sqlx::query(
            "UPDATE slides SET title = ?, description = ?, image_url = ?, link_url = ?, link_text = ?, content_type = ?, related_content_id = ?, media_public_id = ?, order_index = ?, is_active = ? WHERE id = ?"
        )
        .bind(&slide.title)
        .bind(&slide.description)
        .bind(&slide.image_url)
        .bind(slide.target.link_url())
        .bind(&slide.link_text)
        .bind(slide.target.content_type().as_str())
        .bind(slide.target.related_content_id())
        .bind(&slide.media_public_id)
        .bind(slide.order_index)
        .bind(slide.is_active as i32)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(slide)
    }

    /// Flip the active flag of a slide.
    pub async fn toggle_slide(&self, id: &str) -> Result<Slide, AppError> {
        let mut slide = self
            .get_slide(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Slide {} not found", id)))?;

        slide.is_active = !slide.is_active;

        sqlx::query("UPDATE slides SET is_active = ? WHERE id = ?")
            .bind(slide.is_active as i32)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.increment_revision().await?;

        Ok(slide)
    }

    /// Swap a slide with its neighbour in display order.
    ///
    /// Normally the two ordering indices are exchanged. If any two slides
    /// share an index, exchanging would not change the order, so the whole
    /// list is renumbered `0..n` in the requested order instead. Updates are
    /// independent statements, not a transaction. Moving past either end is
    /// a no-op. Returns the full list re-sorted.
    pub async fn move_slide(
        &self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<Vec<Slide>, AppError> {
        let slides = self.list_slides().await?;
        let current = slides
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Slide {} not found", id)))?;

        let target = match direction {
            MoveDirection::Up => current.checked_sub(1),
            MoveDirection::Down => Some(current + 1).filter(|i| *i < slides.len()),
        };
        let Some(target) = target else {
            return Ok(slides);
        };

        let has_ties = slides
            .windows(2)
            .any(|pair| pair[0].order_index == pair[1].order_index);

        let mut updated = slides.clone();
        if has_ties {
            updated.swap(current, target);
            for (position, slide) in updated.iter_mut().enumerate() {
                let order_index = position as i64;
                if slide.order_index == order_index {
                    continue;
                }
                sqlx::query("UPDATE slides SET order_index = ? WHERE id = ?")
                    .bind(order_index)
                    .bind(&slide.id)
                    .execute(&self.pool)
                    .await?;
                slide.order_index = order_index;
            }
            tracing::info!("Renumbered {} slides to move {}", updated.len(), id);
        } else {
            let slide = &slides[current];
            let neighbour = &slides[target];

            sqlx::query("UPDATE slides SET order_index = ? WHERE id = ?")
                .bind(neighbour.order_index)
                .bind(&slide.id)
                .execute(&self.pool)
                .await?;

            sqlx::query("UPDATE slides SET order_index = ? WHERE id = ?")
                .bind(slide.order_index)
                .bind(&neighbour.id)
                .execute(&self.pool)
                .await?;

            tracing::info!(
                "Swapped slide {} (order {}) with {} (order {})",
                slide.id,
                slide.order_index,
                neighbour.id,
                neighbour.order_index
            );

            updated[current].order_index = neighbour.order_index;
            updated[target].order_index = slide.order_index;
            updated.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        }

        self.increment_revision().await?;

        Ok(updated)
    }

    /// Delete a slide.
    pub async fn delete_slide(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM slides WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Slide {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    // ==================== CONTENT OPERATIONS ====================

    /// Records of `kind` that a slide may reference.
    pub async fn list_content_options(
        &self,
        kind: ReferenceKind,
    ) -> Result<Vec<ContentOption>, AppError> {
        let options = match kind {
            ReferenceKind::BlogPost => sqlx::query(
                "SELECT id, title FROM blog_posts WHERE is_published = 1 ORDER BY created_at DESC",
            )
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|row| ContentOption {
                id: row.get("id"),
                title: row.get("title"),
            })
            .collect(),
            ReferenceKind::Announcement => sqlx::query(
                "SELECT id, title, type FROM parish_announcements WHERE is_published = 1 ORDER BY created_at DESC",
            )
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|row| ContentOption {
                id: row.get("id"),
                title: announcement_label(row.get("title"), row.get("type")),
            })
            .collect(),
            ReferenceKind::Event => sqlx::query(
                "SELECT id, community_name, celebration_type, day_of_week, time FROM celebrations WHERE is_active = 1 ORDER BY day_order ASC, time ASC",
            )
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|row| ContentOption {
                id: row.get("id"),
                title: celebration_label(
                    row.get("community_name"),
                    row.get("celebration_type"),
                    row.get("day_of_week"),
                    row.get("time"),
                ),
            })
            .collect(),
        };

        Ok(options)
    }

    // ==================== DONATION OPERATIONS ====================

    /// Find a donation by the payment provider's checkout session id.
    pub async fn find_donation(&self, session_id: &str) -> Result<Option<Donation>, AppError> {
        let row = sqlx::query(
            "SELECT id, amount, currency, donor_name, donor_email, donation_purpose, message, status, created_at FROM donations WHERE payment_session_id = ?"
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(|row| Donation {
            id: row.get("id"),
            amount: row.get("amount"),
            currency: row.get("currency"),
            donor_name: row.get("donor_name"),
            donor_email: row.get("donor_email"),
            donation_purpose: row.get("donation_purpose"),
            message: row.get("message"),
            created_at: row.get("created_at"),
            status: row.get("status"),
        }))
    }

    /// Chapel donation settings, with defaults for anything not stored.
    pub async fn donation_settings(&self) -> Result<DonationSettings, AppError> {
        let rows = sqlx::query("SELECT key, value FROM system_settings WHERE key IN (?, ?, ?, ?)")
            .bind(setting_keys::THANKS_MESSAGE)
            .bind(setting_keys::PHONE)
            .bind(setting_keys::WHATSAPP)
            .bind(setting_keys::EMAIL)
            .fetch_all(&self.pool)
            .await?;

        Ok(DonationSettings::from_pairs(
            rows.iter()
                .map(|row| (row.get::<String, _>("key"), row.get::<String, _>("value"))),
        ))
    }
}

// ==================== ROW MAPPERS ====================

fn slide_from_row(row: &sqlx::sqlite::SqliteRow) -> Slide {
    let content_type: String = row.get("content_type");
    let target = SlideTarget::from_columns(
        &content_type,
        row.get("link_url"),
        row.get("related_content_id"),
    );

    Slide {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        link_text: row.get("link_text"),
        target,
        media_public_id: row.get("media_public_id"),
        order_index: row.get("order_index"),
        is_active: row.get::<i32, _>("is_active") != 0,
        created_at: row.get("created_at"),
    }
}
