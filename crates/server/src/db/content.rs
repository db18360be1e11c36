//! Marketing content repository (hero carousel, main message).

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cyna_core::{HeroSlideId, MainMessageId, MessageSeverity};

use super::RepositoryError;
use crate::models::{HeroCarouselSlide, MainMessage};

#[derive(Debug, sqlx::FromRow)]
struct SlideRow {
    id: i32,
    title: String,
    subtitle: String,
    image_url: String,
    link_url: Option<String>,
    sort_order: i32,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SlideRow> for HeroCarouselSlide {
    fn from(row: SlideRow) -> Self {
        Self {
            id: HeroSlideId::new(row.id),
            title: row.title,
            subtitle: row.subtitle,
            image_url: row.image_url,
            link_url: row.link_url,
            sort_order: row.sort_order,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MainMessageRow {
    id: i32,
    body: String,
    severity: MessageSeverity,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MainMessageRow> for MainMessage {
    fn from(row: MainMessageRow) -> Self {
        Self {
            id: MainMessageId::new(row.id),
            body: row.body,
            severity: row.severity,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SLIDE_COLUMNS: &str =
    "id, title, subtitle, image_url, link_url, sort_order, active, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, body, severity, active, created_at, updated_at";

/// Fields for creating or replacing a slide.
#[derive(Debug, Clone)]
pub struct SlideInput<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub image_url: &'a str,
    pub link_url: Option<&'a str>,
    pub sort_order: i32,
    pub active: bool,
}

/// Repository for marketing content database operations.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Hero carousel
    // =========================================================================

    /// List slides in carousel order. `only_active` hides disabled slides.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_slides(
        &self,
        only_active: bool,
    ) -> Result<Vec<HeroCarouselSlide>, RepositoryError> {
        let rows = sqlx::query_as::<_, SlideRow>(&format!(
            "SELECT {SLIDE_COLUMNS} FROM hero_carousel_slides
             WHERE (NOT $1) OR active
             ORDER BY sort_order, id"
        ))
        .bind(only_active)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a slide.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_slide(
        &self,
        input: SlideInput<'_>,
    ) -> Result<HeroCarouselSlide, RepositoryError> {
        let row = sqlx::query_as::<_, SlideRow>(&format!(
            "INSERT INTO hero_carousel_slides
                 (title, subtitle, image_url, link_url, sort_order, active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {SLIDE_COLUMNS}"
        ))
        .bind(input.title)
        .bind(input.subtitle)
        .bind(input.image_url)
        .bind(input.link_url)
        .bind(input.sort_order)
        .bind(input.active)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a slide.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the slide doesn't exist.
    pub async fn update_slide(
        &self,
        id: HeroSlideId,
        input: SlideInput<'_>,
    ) -> Result<HeroCarouselSlide, RepositoryError> {
        let row = sqlx::query_as::<_, SlideRow>(&format!(
            "UPDATE hero_carousel_slides
             SET title = $1, subtitle = $2, image_url = $3, link_url = $4,
                 sort_order = $5, active = $6, updated_at = now()
             WHERE id = $7
             RETURNING {SLIDE_COLUMNS}"
        ))
        .bind(input.title)
        .bind(input.subtitle)
        .bind(input.image_url)
        .bind(input.link_url)
        .bind(input.sort_order)
        .bind(input.active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a slide.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the slide doesn't exist.
    pub async fn delete_slide(&self, id: HeroSlideId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM hero_carousel_slides WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    // =========================================================================
    // Main message
    // =========================================================================

    /// The currently active main message, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active_message(&self) -> Result<Option<MainMessage>, RepositoryError> {
        let row = sqlx::query_as::<_, MainMessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM main_messages WHERE active"
        ))
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Set the main message, replacing the currently active one.
    ///
    /// Deactivates all other messages in the same transaction; the partial
    /// unique index on `active` guarantees at most one survives.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn set_message(
        &self,
        body: &str,
        severity: MessageSeverity,
        active: bool,
    ) -> Result<MainMessage, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if active {
            sqlx::query("UPDATE main_messages SET active = FALSE WHERE active")
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, MainMessageRow>(&format!(
            "INSERT INTO main_messages (body, severity, active)
             VALUES ($1, $2, $3)
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(body)
        .bind(severity)
        .bind(active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }
}
