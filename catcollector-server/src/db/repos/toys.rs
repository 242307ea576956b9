//! Toy repository
//!
//! Toys are a shared catalog: any signed-in collector can manage them
//! and associate them with their own cats.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{ToyColor, ToyName};

use super::users::DbError;

/// Toy record from database
#[derive(Debug, Clone, FromRow)]
pub struct Toy {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Toy repository
pub struct ToyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ToyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a toy.
    pub async fn create(&self, name: &ToyName, color: &ToyColor) -> Result<Toy, DbError> {
        let toy = sqlx::query_as(
            r#"
            INSERT INTO toys (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color, created_at
            "#,
        )
        .bind(name.as_str())
        .bind(color.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(toy)
    }

    /// List all toys, newest first.
    pub async fn list(&self) -> Result<Vec<Toy>, DbError> {
        let toys = sqlx::query_as(
            r#"
            SELECT id, name, color, created_at
            FROM toys
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(toys)
    }

    /// Get a single toy.
    pub async fn get(&self, id: Uuid) -> Result<Toy, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, color, created_at
            FROM toys
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "toy",
            id: id.to_string(),
        })
    }

    /// Update a toy.
    pub async fn update(&self, id: Uuid, name: &ToyName, color: &ToyColor) -> Result<Toy, DbError> {
        sqlx::query_as(
            r#"
            UPDATE toys
            SET name = $2, color = $3
            WHERE id = $1
            RETURNING id, name, color, created_at
            "#,
        )
        .bind(id)
        .bind(name.as_str())
        .bind(color.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "toy",
            id: id.to_string(),
        })
    }

    /// Delete a toy. Links to cats go with it.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM toys WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "toy",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
