//! Meta Graph API client
//!
//! Fetches Lead Ads form submissions with cursor pagination. Network and API
//! failures surface as distinct error variants and never touch the store.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";
const USER_AGENT: &str = "Leadflow/0.1.0";

/// Fields requested for each lead record
const LEAD_FIELDS: &str = "id,created_time,ad_id,ad_name,campaign_id,campaign_name,field_data";

/// Meta Graph API client errors
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing configuration: {0}")]
    NotConfigured(String),
}

/// One submitted form field: original field name plus its values
/// (single-element for ordinary text fields)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetaFieldData {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A raw lead record as returned by the Graph API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetaLead {
    /// Platform-assigned lead id
    pub id: String,
    pub created_time: Option<String>,
    pub ad_id: Option<String>,
    pub ad_name: Option<String>,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub field_data: Vec<MetaFieldData>,
}

/// One page of leads
#[derive(Debug, Deserialize)]
struct MetaLeadsPage {
    #[serde(default)]
    data: Vec<MetaLead>,
    paging: Option<MetaPaging>,
}

#[derive(Debug, Deserialize)]
struct MetaPaging {
    /// Pre-built URL of the next page, absent on the last one
    next: Option<String>,
}

/// Meta Graph API client
#[derive(Clone)]
pub struct MetaClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MetaClient {
    pub fn new(timeout_ms: u64) -> Result<Self, MetaError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| MetaError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
        })
    }

    /// Override the Graph API base URL (tests, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch all leads submitted to one Lead Ads form
    ///
    /// Follows paging cursors up to `max_pages` pages of `page_limit` leads
    /// each. There is no "since" filter: the caller's reconciler is the dedup
    /// layer, so re-fetching everything is safe, just not cheap.
    pub async fn fetch_form_leads(
        &self,
        access_token: &str,
        api_version: &str,
        form_id: &str,
        page_limit: u32,
        max_pages: u32,
    ) -> Result<Vec<MetaLead>, MetaError> {
        if access_token.is_empty() {
            return Err(MetaError::NotConfigured("meta_access_token".to_string()));
        }
        if form_id.is_empty() {
            return Err(MetaError::NotConfigured("meta_form_id".to_string()));
        }

        let mut url = format!(
            "{}/{}/{}/leads?fields={}&limit={}&access_token={}",
            self.base_url, api_version, form_id, LEAD_FIELDS, page_limit, access_token
        );

        let mut leads = Vec::new();
        for page in 0..max_pages {
            let page_data = self.fetch_page(&url).await?;
            debug!(
                "Lead Center page {}: {} leads",
                page + 1,
                page_data.data.len()
            );
            leads.extend(page_data.data);

            match page_data.paging.and_then(|p| p.next) {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(leads)
    }

    async fn fetch_page(&self, url: &str) -> Result<MetaLeadsPage, MetaError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| MetaError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetaError::ApiError(status.as_u16(), body));
        }

        response
            .json::<MetaLeadsPage>()
            .await
            .map_err(|e| MetaError::ParseError(e.to_string()))
    }
}
