//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A lead (prospect): a contact captured from an advertising form or entered
/// manually, tracked through a qualification pipeline.
///
/// Serialized in camelCase with `lead_id` exposed as `id` to match the
/// dashboard's wire format. Contact attributes are optional because platform
/// form fields vary per campaign.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Platform-assigned identifier, primary dedup key
    #[serde(rename = "id")]
    pub lead_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Origin of the lead: "Facebook", "Instagram", "Manual", ...
    pub source: String,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    pub ad_id: Option<String>,
    pub ad_name: Option<String>,
    pub form_name: Option<String>,
    /// Prospect qualification status (see [`LeadStatus`])
    pub status: String,
    /// CRM pipeline stage (see [`PipelineStage`])
    pub stage: String,
    /// Populated when status is set to "closing"
    pub revenue_amount: Option<f64>,
    pub closing_date: Option<String>,
    /// Original remote field names/values, preserved for audit
    pub raw_data: Option<serde_json::Value>,
    /// Synthetic rollup rows are hidden from user-facing listings
    pub is_aggregated: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Lead {
    /// New manual lead with generated id and default status/stage
    pub fn new_manual(name: String) -> Self {
        let now = Utc::now();
        Self {
            lead_id: Uuid::new_v4().to_string(),
            name: Some(name),
            email: None,
            phone: None,
            company: None,
            source: "Manual".to_string(),
            campaign_id: None,
            campaign_name: None,
            ad_id: None,
            ad_name: None,
            form_name: None,
            status: LeadStatus::New.as_str().to_string(),
            stage: PipelineStage::New.as_str().to_string(),
            revenue_amount: None,
            closing_date: None,
            raw_data: None,
            is_aggregated: false,
            created_at: now,
            last_activity: now,
        }
    }
}

/// Prospect qualification status. Free transitions: the user may set any
/// value at any time, this is a classification rather than a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Closing,
    Converted,
    Lost,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Closing => "closing",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(LeadStatus::New),
            "contacted" => Some(LeadStatus::Contacted),
            "qualified" => Some(LeadStatus::Qualified),
            "closing" => Some(LeadStatus::Closing),
            "converted" => Some(LeadStatus::Converted),
            "lost" => Some(LeadStatus::Lost),
            _ => None,
        }
    }
}

/// CRM pipeline stage. A drag-and-drop in the board sets this directly;
/// any stage to any stage is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PipelineStage {
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::New => "NEW",
            PipelineStage::Contacted => "CONTACTED",
            PipelineStage::Qualified => "QUALIFIED",
            PipelineStage::Proposal => "PROPOSAL",
            PipelineStage::Won => "WON",
            PipelineStage::Lost => "LOST",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NEW" => Some(PipelineStage::New),
            "CONTACTED" => Some(PipelineStage::Contacted),
            "QUALIFIED" => Some(PipelineStage::Qualified),
            "PROPOSAL" => Some(PipelineStage::Proposal),
            "WON" => Some(PipelineStage::Won),
            "LOST" => Some(PipelineStage::Lost),
            _ => None,
        }
    }

    /// Board column order
    pub fn all() -> [PipelineStage; 6] {
        [
            PipelineStage::New,
            PipelineStage::Contacted,
            PipelineStage::Qualified,
            PipelineStage::Proposal,
            PipelineStage::Won,
            PipelineStage::Lost,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}
