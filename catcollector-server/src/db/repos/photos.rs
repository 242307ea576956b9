//! Photo repository
//!
//! Rows hold only the public URL; the bytes live in object storage.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::users::DbError;

/// Photo record from database
#[derive(Debug, Clone, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub cat_id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Photo repository
pub struct PhotoRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PhotoRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an uploaded photo. Callers verify cat ownership first.
    pub async fn create(&self, cat_id: Uuid, url: &str) -> Result<Photo, DbError> {
        let photo = sqlx::query_as(
            r#"
            INSERT INTO photos (cat_id, url)
            VALUES ($1, $2)
            RETURNING id, cat_id, url, created_at
            "#,
        )
        .bind(cat_id)
        .bind(url)
        .fetch_one(self.pool)
        .await?;

        Ok(photo)
    }

    /// List photos for a cat, oldest first.
    pub async fn list_for_cat(&self, cat_id: Uuid) -> Result<Vec<Photo>, DbError> {
        let photos = sqlx::query_as(
            r#"
            SELECT id, cat_id, url, created_at
            FROM photos
            WHERE cat_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(cat_id)
        .fetch_all(self.pool)
        .await?;

        Ok(photos)
    }
}
