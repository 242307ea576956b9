//! Session repository
//!
//! Stores only the SHA-256 hash of the session token. Lookups ignore
//! expired rows; the sweep on login keeps the table from growing.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::users::{DbError, User};

/// Session record from database
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Session repository
pub struct SessionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a session for a user.
    pub async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, DbError> {
        let session = sqlx::query_as(
            r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, created_at, expires_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// Resolve a session token hash to its user.
    ///
    /// Expired sessions are treated as absent.
    pub async fn find_user(&self, token_hash: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT u.id, u.username, u.password_hash, u.created_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Delete a session by token hash (logout). Deleting a missing or
    /// already-expired session is not an error.
    pub async fn delete(&self, token_hash: &str) -> Result<(), DbError> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Sweep expired sessions, returning the number removed.
    pub async fn delete_expired(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::users::UserRepo;
    use crate::models::Username;
    use chrono::Duration;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url)
            .await
            .expect("pool creation failed");
        crate::db::migrations::run(&pool)
            .await
            .expect("migrations failed");
        pool
    }

    async fn seed_user(pool: &PgPool) -> User {
        let name = format!("collector_{}", Uuid::new_v4().simple());
        let username = Username::new(&name).expect("valid username");
        UserRepo::new(pool)
            .create(&username, "not-a-real-hash")
            .await
            .expect("user insert failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn expired_session_is_absent() {
        let pool = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SessionRepo::new(&pool);

        let hash = format!("hash_{}", Uuid::new_v4().simple());
        repo.create(user.id, &hash, Utc::now() - Duration::minutes(1))
            .await
            .expect("session insert failed");

        let found = repo.find_user(&hash).await.expect("lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn live_session_resolves_to_user() {
        let pool = test_pool().await;
        let user = seed_user(&pool).await;
        let repo = SessionRepo::new(&pool);

        let hash = format!("hash_{}", Uuid::new_v4().simple());
        repo.create(user.id, &hash, Utc::now() + Duration::days(14))
            .await
            .expect("session insert failed");

        let found = repo
            .find_user(&hash)
            .await
            .expect("lookup failed")
            .expect("session should resolve");
        assert_eq!(found.id, user.id);

        repo.delete(&hash).await.expect("delete failed");
        let gone = repo.find_user(&hash).await.expect("lookup failed");
        assert!(gone.is_none());
    }
}
