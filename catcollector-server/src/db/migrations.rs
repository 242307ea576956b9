//! Database migrations for the collector tables

use sqlx::PgPool;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            token_hash TEXT NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            expires_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create cats table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cats (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            breed TEXT NOT NULL,
            description TEXT NOT NULL,
            age INTEGER NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create toys table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS toys (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create cat_toys link table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cat_toys (
            cat_id UUID NOT NULL REFERENCES cats(id) ON DELETE CASCADE,
            toy_id UUID NOT NULL REFERENCES toys(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (cat_id, toy_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create photos table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS photos (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            cat_id UUID NOT NULL REFERENCES cats(id) ON DELETE CASCADE,
            url TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create feedings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            cat_id UUID NOT NULL REFERENCES cats(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            meal TEXT NOT NULL DEFAULT 'B',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    create_indexes(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Session indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at)")
        .execute(pool)
        .await?;

    // Cat indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cats_user ON cats(user_id)")
        .execute(pool)
        .await?;

    // Link table index (primary key already covers cat_id lookups)
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cat_toys_toy ON cat_toys(toy_id)")
        .execute(pool)
        .await?;

    // Photo indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_cat ON photos(cat_id)")
        .execute(pool)
        .await?;

    // Feeding indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_feedings_cat_date ON feedings(cat_id, date DESC)")
        .execute(pool)
        .await?;

    Ok(())
}
