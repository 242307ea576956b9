//! Cat repository
//!
//! Every query that touches a cat is scoped to its owner in SQL. A cat
//! belonging to another collector is indistinguishable from one that
//! does not exist.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{Breed, CatAge, CatDescription, CatName};

use super::toys::Toy;
use super::users::DbError;

/// Cat record from database
#[derive(Debug, Clone, FromRow)]
pub struct Cat {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cat repository
pub struct CatRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CatRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a cat owned by `user_id`.
    ///
    /// The owner comes from the session, never from the form.
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &CatName,
        breed: &Breed,
        description: &CatDescription,
        age: CatAge,
    ) -> Result<Cat, DbError> {
        let cat = sqlx::query_as(
            r#"
            INSERT INTO cats (user_id, name, breed, description, age)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, breed, description, age, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name.as_str())
        .bind(breed.as_str())
        .bind(description.as_str())
        .bind(age.value())
        .fetch_one(self.pool)
        .await?;

        Ok(cat)
    }

    /// List the cats owned by `user_id`, newest first.
    pub async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Cat>, DbError> {
        let cats = sqlx::query_as(
            r#"
            SELECT id, user_id, name, breed, description, age, created_at, updated_at
            FROM cats
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(cats)
    }

    /// Get one cat owned by `user_id`.
    pub async fn get_for_owner(&self, id: Uuid, user_id: Uuid) -> Result<Cat, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, name, breed, description, age, created_at, updated_at
            FROM cats
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "cat",
            id: id.to_string(),
        })
    }

    /// Update a cat owned by `user_id`.
    pub async fn update_for_owner(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: &CatName,
        breed: &Breed,
        description: &CatDescription,
        age: CatAge,
    ) -> Result<Cat, DbError> {
        sqlx::query_as(
            r#"
            UPDATE cats
            SET name = $3, breed = $4, description = $5, age = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, breed, description, age, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name.as_str())
        .bind(breed.as_str())
        .bind(description.as_str())
        .bind(age.value())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "cat",
            id: id.to_string(),
        })
    }

    /// Delete a cat owned by `user_id`.
    ///
    /// Cascades take the feedings, photos, and toy links with it.
    pub async fn delete_for_owner(&self, id: Uuid, user_id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "cat",
                id: id.to_string(),
            });
        }

        Ok(())
    }

    /// Toys already associated with a cat.
    pub async fn toys_for_cat(&self, cat_id: Uuid) -> Result<Vec<Toy>, DbError> {
        let toys = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.color, t.created_at
            FROM cat_toys ct
            JOIN toys t ON t.id = ct.toy_id
            WHERE ct.cat_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(cat_id)
        .fetch_all(self.pool)
        .await?;

        Ok(toys)
    }

    /// Toys the cat does not have yet, for the detail page picker.
    ///
    /// Anti-join keeps this a single query.
    pub async fn available_toys(&self, cat_id: Uuid) -> Result<Vec<Toy>, DbError> {
        let toys = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.color, t.created_at
            FROM toys t
            WHERE NOT EXISTS (
                SELECT 1 FROM cat_toys ct
                WHERE ct.cat_id = $1 AND ct.toy_id = t.id
            )
            ORDER BY t.name
            "#,
        )
        .bind(cat_id)
        .fetch_all(self.pool)
        .await?;

        Ok(toys)
    }

    /// Associate a toy with a cat (idempotent).
    ///
    /// ON CONFLICT makes repeat requests harmless. Callers verify cat
    /// ownership first, so a foreign key failure here means the toy.
    pub async fn attach_toy(&self, cat_id: Uuid, toy_id: Uuid) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO cat_toys (cat_id, toy_id)
            VALUES ($1, $2)
            ON CONFLICT (cat_id, toy_id) DO NOTHING
            "#,
        )
        .bind(cat_id)
        .bind(toy_id)
        .execute(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => DbError::NotFound {
                resource: "toy",
                id: toy_id.to_string(),
            },
            _ => DbError::Sqlx(e),
        })?;

        Ok(())
    }
}
