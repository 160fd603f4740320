//! Postgres 实现（sqlx）
//!
//! 启动时执行 [`bootstrap_schema`] 建表，语句均为幂等的 `IF NOT EXISTS`。
//!
mod files;
mod posts;
mod users;

pub use files::PgFileRepository;
pub use posts::PgPostRepository;
pub use users::PgUserRepository;

use snapix_domain::error::DomainResult;
use sqlx::postgres::{PgPool, PgPoolOptions};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id                       BIGINT PRIMARY KEY,
        username                 TEXT NOT NULL,
        email                    TEXT NOT NULL UNIQUE,
        email_confirmed          BOOLEAN NOT NULL DEFAULT FALSE,
        first_name               TEXT,
        last_name                TEXT,
        date_of_birth            DATE,
        city                     TEXT,
        about_me                 TEXT,
        confirmation_code        TEXT,
        recovery_code            TEXT,
        recovery_code_expires_at TIMESTAMPTZ,
        created_at               TIMESTAMPTZ NOT NULL,
        updated_at               TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS files (
        id            UUID PRIMARY KEY,
        owner_id      BIGINT NOT NULL,
        kind          TEXT NOT NULL,
        key           TEXT NOT NULL UNIQUE,
        mime          TEXT NOT NULL,
        original_name TEXT NOT NULL,
        size          BIGINT NOT NULL,
        post_id       UUID,
        created_at    TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS files_owner_kind_idx ON files (owner_id, kind)",
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id         UUID PRIMARY KEY,
        author_id  BIGINT NOT NULL,
        image_id   UUID NOT NULL,
        content    TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
];

pub async fn connect(database_url: &str) -> DomainResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn bootstrap_schema(pool: &PgPool) -> DomainResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!(statements = SCHEMA.len(), "database schema ensured");
    Ok(())
}
