//! HTTP API handlers for lf-pm

pub mod auth_middleware;
pub mod buildinfo;
pub mod error;
pub mod health;
pub mod leadcenter;
pub mod pipeline;
pub mod prospects;
pub mod stats;

pub use auth_middleware::auth_middleware;
pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use health::health_routes;
pub use leadcenter::sync_lead_center;
pub use pipeline::{pipeline_board, set_pipeline_stage};
pub use prospects::{
    create_prospect, delete_prospect, get_prospect, import_prospects, list_prospects,
    update_prospect,
};
pub use stats::dashboard_stats;
