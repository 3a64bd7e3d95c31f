//! Meta Lead Center sync trigger
//!
//! Fetches all leads for the configured Lead Ads form, adapts them into the
//! canonical shape, and runs the reconciler. There is no sync cursor: every
//! call re-fetches everything and relies on dedup, so hitting this endpoint
//! again IS the "force resynchronization".

use axum::{extract::State, Json};
use serde::Serialize;

use lf_common::db::models::Lead;
use lf_common::db::settings::get_setting_or;

use crate::api::ApiError;
use crate::meta::{lead_from_meta, MetaError};
use crate::reconcile::reconcile;
use crate::AppState;

/// Response for GET /meta/leadcenter
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCenterResponse {
    pub success: bool,
    /// The fetched (normalized) remote leads, saved or not
    pub leads: Vec<Lead>,
    /// Leads newly persisted this run. Field name kept from the dashboard's
    /// original wire format.
    #[serde(rename = "savedToFirebase")]
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_count: usize,
    pub source: String,
    pub message: String,
}

/// GET /meta/leadcenter
///
/// A remote fetch failure returns 502 and leaves the store untouched;
/// individual persist failures are reported in `failed` without aborting the
/// batch.
pub async fn sync_lead_center(
    State(state): State<AppState>,
) -> Result<Json<LeadCenterResponse>, ApiError> {
    let access_token = get_setting_or(&state.db, "meta_access_token", "").await?;
    let form_id = get_setting_or(&state.db, "meta_form_id", "").await?;
    let form_name = get_setting_or(&state.db, "meta_form_name", "").await?;
    let api_version = get_setting_or(&state.db, "meta_api_version", "v21.0").await?;
    let page_limit: u32 = get_setting_or(&state.db, "meta_page_limit", "100")
        .await?
        .parse()
        .unwrap_or(100);
    let max_pages: u32 = get_setting_or(&state.db, "meta_max_pages", "25")
        .await?
        .parse()
        .unwrap_or(25);

    let remote = state
        .meta
        .fetch_form_leads(&access_token, &api_version, &form_id, page_limit, max_pages)
        .await
        .map_err(|e| match e {
            MetaError::NotConfigured(key) => {
                ApiError::Validation(format!("Lead Center is not configured: set {}", key))
            }
            other => ApiError::Remote(other.to_string()),
        })?;

    let leads: Vec<Lead> = remote
        .iter()
        .map(|raw| lead_from_meta(&form_name, raw))
        .collect();

    let outcome = reconcile(&state.db, leads.clone()).await?;

    let message = format!(
        "Imported {} new leads ({} already present, {} failed) of {}",
        outcome.saved, outcome.skipped, outcome.failed, outcome.total
    );

    Ok(Json(LeadCenterResponse {
        success: true,
        leads,
        saved: outcome.saved,
        skipped: outcome.skipped,
        failed: outcome.failed,
        total_count: outcome.total,
        source: "meta_lead_center".to_string(),
        message,
    }))
}
