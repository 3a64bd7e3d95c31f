//! Settings table access
//!
//! Key-value configuration stored in the database so every service sees the
//! same values without per-service config files.

use crate::Result;
use sqlx::SqlitePool;

/// Get a setting value, None if the key is absent or NULL
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<Option<String>> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

    Ok(value.flatten())
}

/// Get a setting value, falling back to a default when absent or empty
pub async fn get_setting_or(pool: &SqlitePool, key: &str, default: &str) -> Result<String> {
    match get_setting(pool, key).await? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Ok(default.to_string()),
    }
}

/// Set (insert or replace) a setting value
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Ensure a setting exists with a default value
///
/// Never overwrites an existing non-NULL value. NULL values are reset to the
/// default (a NULL setting is indistinguishable from a missing one).
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO settings (key, value)
        VALUES (?, ?)
        "#,
    )
    .bind(key)
    .bind(default)
    .execute(pool)
    .await?;

    sqlx::query("UPDATE settings SET value = ? WHERE key = ? AND value IS NULL")
        .bind(default)
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}
