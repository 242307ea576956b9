//! Feeding repository
//!
//! Feedings hang off a cat and are listed newest-date first on the
//! detail page.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{FeedingDate, MealKind};

use super::users::DbError;

/// Feeding record from database
#[derive(Debug, Clone, FromRow)]
pub struct Feeding {
    pub id: Uuid,
    pub cat_id: Uuid,
    pub date: chrono::NaiveDate,
    pub meal: String,
    pub created_at: DateTime<Utc>,
}

/// Feeding repository
pub struct FeedingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a feeding for a cat. Callers verify cat ownership first.
    pub async fn create(
        &self,
        cat_id: Uuid,
        date: FeedingDate,
        meal: MealKind,
    ) -> Result<Feeding, DbError> {
        let feeding = sqlx::query_as(
            r#"
            INSERT INTO feedings (cat_id, date, meal)
            VALUES ($1, $2, $3)
            RETURNING id, cat_id, date, meal, created_at
            "#,
        )
        .bind(cat_id)
        .bind(date.as_date())
        .bind(meal.code())
        .fetch_one(self.pool)
        .await?;

        Ok(feeding)
    }

    /// List feedings for a cat, most recent date first.
    pub async fn list_for_cat(&self, cat_id: Uuid) -> Result<Vec<Feeding>, DbError> {
        let feedings = sqlx::query_as(
            r#"
            SELECT id, cat_id, date, meal, created_at
            FROM feedings
            WHERE cat_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(cat_id)
        .fetch_all(self.pool)
        .await?;

        Ok(feedings)
    }
}
