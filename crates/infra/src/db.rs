//! Database adapters (connection pool, schema bootstrap).

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Open the process-wide Postgres pool.
///
/// The pool is created once at startup and handed to the stores explicitly;
/// it is closed on shutdown by whoever owns it.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .context("failed to connect to Postgres - check DATABASE_URL")?;

    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout.as_secs(),
        "postgres pool ready"
    );

    Ok(pool)
}

/// Create the contacts table and its lookup index if they don't exist.
///
/// Email is indexed but deliberately not unique.
pub async fn bootstrap_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "Contacts" (
            "Id"    BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            "Name"  TEXT NOT NULL,
            "Email" TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create Contacts table")?;

    sqlx::query(r#"CREATE INDEX IF NOT EXISTS "IX_Contacts_Email" ON "Contacts" ("Email")"#)
        .execute(pool)
        .await
        .context("failed to create Contacts email index")?;

    tracing::info!("contacts schema ready");
    Ok(())
}
