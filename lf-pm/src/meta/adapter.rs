//! Meta lead adapter
//!
//! Maps a raw Graph API lead into the canonical [`Lead`]. Lead Ads forms are
//! free to name their fields anything, so this matches the common naming
//! variants; the original names and values are preserved in `raw_data` for
//! audit. This is the only place allowed to guess at remote field names.

use chrono::{DateTime, Utc};
use lf_common::db::models::{Lead, LeadStatus, PipelineStage};
use serde_json::json;

use super::client::MetaLead;

/// Convert one raw Meta lead into the canonical shape
pub fn lead_from_meta(form_name: &str, remote: &MetaLead) -> Lead {
    let mut name = None;
    let mut email = None;
    let mut phone = None;
    let mut company = None;
    let mut platform = None;

    let mut raw = serde_json::Map::new();
    for field in &remote.field_data {
        let value = field.values.first().cloned().unwrap_or_default();
        raw.insert(field.name.clone(), json!(field.values));

        let key = field.name.to_lowercase();
        match key.as_str() {
            "full_name" | "name" | "nombre" => name = name.or(Some(value)),
            "first_name" => {
                // first_name + last_name forms: join on the fly
                name = name.or(Some(value));
            }
            "last_name" => {
                name = match name {
                    Some(first) => Some(format!("{} {}", first, value)),
                    None => Some(value),
                };
            }
            "company_name" | "company" => company = company.or(Some(value)),
            "platform" => platform = Some(value),
            _ if key.contains("email") => email = email.or(Some(value)),
            _ if key.contains("phone") => phone = phone.or(Some(value)),
            _ => {}
        }
    }

    let source = match platform.as_deref() {
        Some(p) if p.eq_ignore_ascii_case("instagram") => "Instagram".to_string(),
        _ => "Facebook".to_string(),
    };

    let created_at = remote
        .created_time
        .as_deref()
        .and_then(parse_graph_time)
        .unwrap_or_else(Utc::now);

    Lead {
        lead_id: remote.id.clone(),
        name,
        email,
        phone,
        company,
        source,
        campaign_id: remote.campaign_id.clone(),
        campaign_name: remote.campaign_name.clone(),
        ad_id: remote.ad_id.clone(),
        ad_name: remote.ad_name.clone(),
        form_name: if form_name.is_empty() {
            None
        } else {
            Some(form_name.to_string())
        },
        status: LeadStatus::New.as_str().to_string(),
        stage: PipelineStage::New.as_str().to_string(),
        revenue_amount: None,
        closing_date: None,
        raw_data: Some(serde_json::Value::Object(raw)),
        is_aggregated: false,
        created_at,
        last_activity: created_at,
    }
}

/// Graph API timestamps look like `2024-03-01T12:34:56+0000` - an RFC 3339
/// variant with no colon in the offset, which chrono's %z accepts
fn parse_graph_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
