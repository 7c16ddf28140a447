//! Table bootstrap for the PostgreSQL backend
//!
//! Statements are idempotent and run once at startup before serving.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

/// `gen_random_uuid()` is built in from PostgreSQL 13.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS session_times (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL,
        start_time TIMESTAMPTZ NOT NULL,
        end_time TIMESTAMPTZ NOT NULL,
        duration DOUBLE PRECISION NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS session_times_user_id_idx ON session_times (user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS experiencias (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        owner UUID NOT NULL,
        participants UUID[] NOT NULL DEFAULT '{}',
        description TEXT NOT NULL DEFAULT '',
        tipo TEXT NOT NULL DEFAULT ''
    )
    "#,
];

/// Create the tables used by the repositories if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> DatabaseResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    }

    info!("Database schema is up to date");
    Ok(())
}
