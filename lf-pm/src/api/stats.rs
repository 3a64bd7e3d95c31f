//! Dashboard statistics API
//!
//! The dashboard polls this endpoint for its headline numbers. Everything is
//! computed from the store on request; there is no cached or simulated
//! metrics state.

use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;

use lf_common::db::leads;
use lf_common::db::models::{LeadStatus, PipelineStage};

use crate::api::ApiError;
use crate::AppState;

/// Response for GET /stats
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub total_leads: i64,
    /// Counts per status, zero-filled for statuses with no leads
    pub by_status: BTreeMap<String, i64>,
    /// Counts per pipeline stage, zero-filled likewise
    pub by_stage: BTreeMap<String, i64>,
    /// Revenue over leads in closing or converted status
    pub total_revenue: f64,
}

/// GET /stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, ApiError> {
    let total_leads = leads::lead_count(&state.db).await?;

    let mut by_status: BTreeMap<String, i64> = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Closing,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ]
    .iter()
    .map(|s| (s.as_str().to_string(), 0))
    .collect();
    for (status, count) in leads::counts_by_status(&state.db).await? {
        by_status.insert(status, count);
    }

    let mut by_stage: BTreeMap<String, i64> = PipelineStage::all()
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    for (stage, count) in leads::counts_by_stage(&state.db).await? {
        by_stage.insert(stage, count);
    }

    let total_revenue = leads::total_revenue(&state.db).await?;

    Ok(Json(StatsResponse {
        success: true,
        total_leads,
        by_status,
        by_stage,
        total_revenue,
    }))
}
