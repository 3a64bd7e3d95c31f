//! CRM pipeline board API
//!
//! The board is a direct-manipulation view: dropping a card on a column is a
//! flat write of the target stage. No transition validation by design, any
//! stage to any stage is a legal move.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use lf_common::db::leads;
use lf_common::db::models::{Lead, PipelineStage};

use crate::api::prospects::MutationResponse;
use crate::api::ApiError;
use crate::AppState;

/// Response for GET /pipeline
#[derive(Debug, Serialize)]
pub struct PipelineBoardResponse {
    pub success: bool,
    /// Leads grouped per stage, every column present even when empty
    pub columns: BTreeMap<String, Vec<Lead>>,
    pub count: usize,
}

/// GET /pipeline
///
/// Leads grouped by pipeline stage for the board view.
pub async fn pipeline_board(
    State(state): State<AppState>,
) -> Result<Json<PipelineBoardResponse>, ApiError> {
    let all = leads::list_leads(&state.db).await?;
    let count = all.len();

    let mut columns: BTreeMap<String, Vec<Lead>> = PipelineStage::all()
        .iter()
        .map(|stage| (stage.as_str().to_string(), Vec::new()))
        .collect();

    for lead in all {
        columns.entry(lead.stage.clone()).or_default().push(lead);
    }

    Ok(Json(PipelineBoardResponse {
        success: true,
        columns,
        count,
    }))
}

/// Request for PUT /pipeline/:id/stage
#[derive(Debug, Deserialize)]
pub struct SetStageRequest {
    pub stage: String,
}

/// PUT /pipeline/:id/stage
///
/// Sets the lead's stage to the drop target's stage and bumps
/// `last_activity`.
pub async fn set_pipeline_stage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetStageRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let stage = PipelineStage::parse(&request.stage)
        .ok_or_else(|| ApiError::Validation(format!("Unknown stage: {}", request.stage)))?;

    let found = leads::set_stage(&state.db, &id, stage.as_str()).await?;
    if !found {
        return Err(ApiError::NotFound(format!("lead {}", id)));
    }

    Ok(Json(MutationResponse { success: true }))
}
