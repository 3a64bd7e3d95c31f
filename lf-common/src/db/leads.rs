//! Lead query layer
//!
//! All SQL touching the leads table lives here; services and the import
//! reconciler go through these functions rather than writing ad-hoc queries.
//! User-facing listings exclude aggregated rollup rows.

use crate::db::models::Lead;
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashSet;

const LEAD_COLUMNS: &str = "lead_id, name, email, phone, company, source, \
     campaign_id, campaign_name, ad_id, ad_name, form_name, status, stage, \
     revenue_amount, closing_date, raw_data, is_aggregated, created_at, last_activity";

/// Insert a new lead
///
/// Fails with a constraint violation if `lead_id` already exists; the
/// reconciler relies on this as the last line of dedup defense.
pub async fn insert_lead(pool: &SqlitePool, lead: &Lead) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO leads (
            lead_id, name, email, phone, company, source,
            campaign_id, campaign_name, ad_id, ad_name, form_name,
            status, stage, revenue_amount, closing_date, raw_data,
            is_aggregated, created_at, last_activity
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&lead.lead_id)
    .bind(&lead.name)
    .bind(&lead.email)
    .bind(&lead.phone)
    .bind(&lead.company)
    .bind(&lead.source)
    .bind(&lead.campaign_id)
    .bind(&lead.campaign_name)
    .bind(&lead.ad_id)
    .bind(&lead.ad_name)
    .bind(&lead.form_name)
    .bind(&lead.status)
    .bind(&lead.stage)
    .bind(lead.revenue_amount)
    .bind(&lead.closing_date)
    .bind(&lead.raw_data)
    .bind(lead.is_aggregated)
    .bind(lead.created_at)
    .bind(lead.last_activity)
    .execute(pool)
    .await?;

    Ok(())
}

/// List all user-facing leads, newest first
pub async fn list_leads(pool: &SqlitePool) -> Result<Vec<Lead>> {
    let leads = sqlx::query_as::<_, Lead>(&format!(
        "SELECT {} FROM leads WHERE is_aggregated = 0 ORDER BY created_at DESC",
        LEAD_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(leads)
}

/// Fetch one lead by id
pub async fn get_lead(pool: &SqlitePool, lead_id: &str) -> Result<Option<Lead>> {
    let lead = sqlx::query_as::<_, Lead>(&format!(
        "SELECT {} FROM leads WHERE lead_id = ?",
        LEAD_COLUMNS
    ))
    .bind(lead_id)
    .fetch_optional(pool)
    .await?;

    Ok(lead)
}

/// Load the set of existing lead ids
///
/// The reconciler partitions incoming batches against this set; it is a
/// single SELECT of one column, not a full-row comparison.
pub async fn existing_lead_ids(pool: &SqlitePool) -> Result<HashSet<String>> {
    let ids: Vec<String> = sqlx::query_scalar("SELECT lead_id FROM leads")
        .fetch_all(pool)
        .await?;

    Ok(ids.into_iter().collect())
}

/// Partial update of one lead's editable fields
///
/// Absent fields keep their current value. Any update bumps `last_activity`.
/// Returns false when no lead with the given id exists.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    pub revenue_amount: Option<f64>,
    pub closing_date: Option<String>,
}

pub async fn update_lead(pool: &SqlitePool, lead_id: &str, update: &LeadUpdate) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE leads SET
            name = COALESCE(?, name),
            email = COALESCE(?, email),
            phone = COALESCE(?, phone),
            company = COALESCE(?, company),
            status = COALESCE(?, status),
            revenue_amount = COALESCE(?, revenue_amount),
            closing_date = COALESCE(?, closing_date),
            last_activity = ?
        WHERE lead_id = ?
        "#,
    )
    .bind(&update.name)
    .bind(&update.email)
    .bind(&update.phone)
    .bind(&update.company)
    .bind(&update.status)
    .bind(update.revenue_amount)
    .bind(&update.closing_date)
    .bind(Utc::now())
    .bind(lead_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Flat write of the pipeline stage plus a `last_activity` bump
///
/// No transition validation: any stage to any stage is permitted.
pub async fn set_stage(pool: &SqlitePool, lead_id: &str, stage: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE leads SET stage = ?, last_activity = ? WHERE lead_id = ?")
        .bind(stage)
        .bind(Utc::now())
        .bind(lead_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete one lead. Returns false when the id does not exist.
pub async fn delete_lead(pool: &SqlitePool, lead_id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM leads WHERE lead_id = ?")
        .bind(lead_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count of user-facing leads
pub async fn lead_count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE is_aggregated = 0")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Lead counts grouped by status (user-facing rows only)
pub async fn counts_by_status(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM leads WHERE is_aggregated = 0 GROUP BY status",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Lead counts grouped by pipeline stage (user-facing rows only)
pub async fn counts_by_stage(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT stage, COUNT(*) FROM leads WHERE is_aggregated = 0 GROUP BY stage",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Sum of revenue over leads that reached closing or converted
pub async fn total_revenue(pool: &SqlitePool) -> Result<f64> {
    let sum: Option<f64> = sqlx::query_scalar(
        r#"
        SELECT SUM(revenue_amount) FROM leads
        WHERE is_aggregated = 0 AND status IN ('closing', 'converted')
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(sum.unwrap_or(0.0))
}
