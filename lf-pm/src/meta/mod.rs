//! Meta (Facebook/Instagram) Lead Ads integration
//!
//! `client` speaks the Graph API; `adapter` maps its payloads into the
//! canonical Lead shape. All source-specific field-name guessing stays in the
//! adapter so the reconciler only ever sees normalized leads.

pub mod adapter;
pub mod client;

pub use adapter::lead_from_meta;
pub use client::{MetaClient, MetaError, MetaFieldData, MetaLead};
