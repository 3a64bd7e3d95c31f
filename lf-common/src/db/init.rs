//! Database initialization
//!
//! Creates the database on first run with the full schema, upgrades older
//! databases through versioned migrations, and seeds default settings.
//! Safe to call from every service at startup (idempotent).

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use super::settings::ensure_setting;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc creates the database file when missing
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL mode allows concurrent readers with one writer, which matters
    // during bulk lead imports running alongside dashboard reads
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    // Create tables (idempotent - safe to call multiple times)
    create_schema_version_table(&pool).await?;
    create_settings_table(&pool).await?;
    create_leads_table(&pool).await?;

    // Versioned migrations for databases created by older releases
    crate::db::migrations::run_migrations(&pool).await?;

    // Seed default settings
    init_default_settings(&pool).await?;

    Ok(pool)
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the leads table
///
/// `lead_id` is the platform-assigned identifier and the dedup key; the
/// PRIMARY KEY constraint is what makes duplicate imports impossible at the
/// storage level.
async fn create_leads_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            lead_id TEXT PRIMARY KEY,
            name TEXT,
            email TEXT,
            phone TEXT,
            company TEXT,
            source TEXT NOT NULL DEFAULT 'Manual',
            campaign_id TEXT,
            campaign_name TEXT,
            ad_id TEXT,
            ad_name TEXT,
            form_name TEXT,
            status TEXT NOT NULL DEFAULT 'new',
            stage TEXT NOT NULL DEFAULT 'NEW',
            revenue_amount REAL,
            closing_date TEXT,
            raw_data TEXT,
            is_aggregated INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL,
            last_activity TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_stage ON leads(stage)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Initialize or update default settings
///
/// Ensures all required settings exist with default values. Existing values
/// are never overwritten; NULL values are reset to defaults.
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // API authentication (empty token disables auth checking)
    ensure_setting(pool, "api_token", "").await?;

    // Meta Lead Center integration
    ensure_setting(pool, "meta_access_token", "").await?;
    ensure_setting(pool, "meta_form_id", "").await?;
    ensure_setting(pool, "meta_form_name", "").await?;
    ensure_setting(pool, "meta_api_version", "v21.0").await?;
    ensure_setting(pool, "meta_page_limit", "100").await?;
    ensure_setting(pool, "meta_max_pages", "25").await?;

    // HTTP client settings
    ensure_setting(pool, "http_request_timeout_ms", "30000").await?;

    Ok(())
}
