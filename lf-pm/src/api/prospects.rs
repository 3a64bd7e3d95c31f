//! Prospect CRUD API
//!
//! List, create, edit and delete leads, plus the bulk import endpoint used to
//! migrate a browser-local cache into the store. Bulk import runs through the
//! reconciler so re-running a migration can never duplicate leads.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lf_common::db::leads::{self, LeadUpdate};
use lf_common::db::models::{Lead, LeadStatus, PipelineStage};

use crate::api::ApiError;
use crate::reconcile::reconcile;
use crate::AppState;

/// A lead as sent by the dashboard: everything optional, id generated when
/// absent. Shared by manual create and bulk import.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    pub ad_id: Option<String>,
    pub ad_name: Option<String>,
    pub form_name: Option<String>,
    pub status: Option<String>,
    pub stage: Option<String>,
    pub revenue_amount: Option<f64>,
    pub closing_date: Option<String>,
    pub raw_data: Option<serde_json::Value>,
    /// Client-side creation timestamp, preserved on migration
    pub date: Option<DateTime<Utc>>,
}

impl ProspectPayload {
    /// Convert into a canonical Lead, validating enum-like fields
    fn into_lead(self, default_source: &str) -> Result<Lead, ApiError> {
        let status = match self.status {
            Some(value) => LeadStatus::parse(&value)
                .ok_or_else(|| ApiError::Validation(format!("Unknown status: {}", value)))?
                .as_str()
                .to_string(),
            None => LeadStatus::New.as_str().to_string(),
        };

        let stage = match self.stage {
            Some(value) => PipelineStage::parse(&value)
                .ok_or_else(|| ApiError::Validation(format!("Unknown stage: {}", value)))?
                .as_str()
                .to_string(),
            None => PipelineStage::New.as_str().to_string(),
        };

        let created_at = self.date.unwrap_or_else(Utc::now);

        Ok(Lead {
            lead_id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            source: self
                .source
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default_source.to_string()),
            campaign_id: self.campaign_id,
            campaign_name: self.campaign_name,
            ad_id: self.ad_id,
            ad_name: self.ad_name,
            form_name: self.form_name,
            status,
            stage,
            revenue_amount: self.revenue_amount,
            closing_date: self.closing_date,
            raw_data: self.raw_data,
            is_aggregated: false,
            created_at,
            last_activity: created_at,
        })
    }
}

/// Response for GET /prospects
#[derive(Debug, Serialize)]
pub struct ProspectListResponse {
    pub success: bool,
    pub prospects: Vec<Lead>,
    pub count: usize,
}

/// GET /prospects
///
/// All user-facing leads, newest first. Aggregated rollup rows are excluded.
pub async fn list_prospects(
    State(state): State<AppState>,
) -> Result<Json<ProspectListResponse>, ApiError> {
    let prospects = leads::list_leads(&state.db).await?;
    let count = prospects.len();

    Ok(Json(ProspectListResponse {
        success: true,
        prospects,
        count,
    }))
}

/// Response for GET /prospects/:id
#[derive(Debug, Serialize)]
pub struct ProspectResponse {
    pub success: bool,
    pub prospect: Lead,
}

/// GET /prospects/:id
pub async fn get_prospect(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProspectResponse>, ApiError> {
    let prospect = leads::get_lead(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("lead {}", id)))?;

    Ok(Json(ProspectResponse {
        success: true,
        prospect,
    }))
}

/// Response for POST /prospects
#[derive(Debug, Serialize)]
pub struct CreateProspectResponse {
    pub success: bool,
    pub id: String,
}

/// POST /prospects
///
/// Manual lead entry. `name` is required; everything else is optional and
/// the source defaults to "Manual".
pub async fn create_prospect(
    State(state): State<AppState>,
    Json(payload): Json<ProspectPayload>,
) -> Result<Json<CreateProspectResponse>, ApiError> {
    if payload.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
        return Err(ApiError::Validation("Missing required field: name".to_string()));
    }

    let lead = payload.into_lead("Manual")?;
    let id = lead.lead_id.clone();
    leads::insert_lead(&state.db, &lead).await?;

    Ok(Json(CreateProspectResponse { success: true, id }))
}

/// Request for PUT /prospects (bulk import)
#[derive(Debug, Deserialize)]
pub struct ImportProspectsRequest {
    pub prospects: Vec<ProspectPayload>,
    pub source: String,
}

/// Response for PUT /prospects
#[derive(Debug, Serialize)]
pub struct ImportProspectsResponse {
    pub success: bool,
    pub imported: usize,
    pub skipped: usize,
}

/// PUT /prospects
///
/// One-time migration of a locally cached lead list into the store. Goes
/// through the reconciler, so already-imported leads are skipped.
pub async fn import_prospects(
    State(state): State<AppState>,
    Json(request): Json<ImportProspectsRequest>,
) -> Result<Json<ImportProspectsResponse>, ApiError> {
    let mut incoming = Vec::with_capacity(request.prospects.len());
    for payload in request.prospects {
        incoming.push(payload.into_lead(&request.source)?);
    }

    let outcome = reconcile(&state.db, incoming).await?;

    Ok(Json(ImportProspectsResponse {
        success: true,
        imported: outcome.saved,
        skipped: outcome.skipped,
    }))
}

/// Response for PUT /prospects/:id and DELETE /prospects/:id
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
}

/// PUT /prospects/:id
///
/// Partial field update. Setting status to "closing" is expected to carry
/// `revenueAmount` and `closingDate` in the same request. Bumps
/// `last_activity`.
pub async fn update_prospect(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<LeadUpdate>,
) -> Result<Json<MutationResponse>, ApiError> {
    if let Some(status) = &update.status {
        if LeadStatus::parse(status).is_none() {
            return Err(ApiError::Validation(format!("Unknown status: {}", status)));
        }
    }

    let found = leads::update_lead(&state.db, &id, &update).await?;
    if !found {
        return Err(ApiError::NotFound(format!("lead {}", id)));
    }

    Ok(Json(MutationResponse { success: true }))
}

/// DELETE /prospects/:id
///
/// Removes one lead. Bulk deletion is a client-side loop of these calls;
/// there is deliberately no delete-all endpoint.
pub async fn delete_prospect(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let found = leads::delete_lead(&state.db, &id).await?;
    if !found {
        return Err(ApiError::NotFound(format!("lead {}", id)));
    }

    Ok(Json(MutationResponse { success: true }))
}
