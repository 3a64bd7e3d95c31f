//! Database schema migrations
//!
//! Versioned schema migrations so databases created by older releases upgrade
//! seamlessly without manual deletion or data loss.
//!
//! Guidelines:
//!
//! 1. **Never modify existing migrations** - they must remain stable for users
//!    upgrading from older versions
//! 2. **Always add new migrations** - one migration function per schema change
//! 3. **Keep migrations idempotent** - check before altering
//! 4. **Use ALTER TABLE** - prefer ALTER TABLE over DROP/CREATE to preserve data

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

/// Set schema version in database
async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        warn!("This may indicate a downgrade. Proceeding with caution.");
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    // Run migrations sequentially
    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    Ok(())
}

/// v1: Baseline schema
///
/// The baseline tables are created by init_database before migrations run,
/// so this only records that the database is at the baseline.
async fn migrate_v1(_pool: &SqlitePool) -> Result<()> {
    Ok(())
}

/// v2: CRM pipeline board
///
/// Adds `stage` and `last_activity` to leads for databases created before
/// the pipeline board shipped. New databases get these columns from
/// CREATE TABLE directly.
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    let has_stage: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pragma_table_info('leads') WHERE name = 'stage'",
    )
    .fetch_one(pool)
    .await?;

    if has_stage == 0 {
        sqlx::query("ALTER TABLE leads ADD COLUMN stage TEXT NOT NULL DEFAULT 'NEW'")
            .execute(pool)
            .await?;
        info!("Migration v2: Added stage to leads table");
    }

    let has_last_activity: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pragma_table_info('leads') WHERE name = 'last_activity'",
    )
    .fetch_one(pool)
    .await?;

    if has_last_activity == 0 {
        // SQLite cannot ADD COLUMN with a non-constant default; backfill instead
        sqlx::query("ALTER TABLE leads ADD COLUMN last_activity TIMESTAMP")
            .execute(pool)
            .await?;
        sqlx::query("UPDATE leads SET last_activity = created_at WHERE last_activity IS NULL")
            .execute(pool)
            .await?;
        info!("Migration v2: Added last_activity to leads table");
    }

    Ok(())
}
