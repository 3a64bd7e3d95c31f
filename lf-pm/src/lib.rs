//! lf-pm library - Prospect Manager module
//!
//! HTTP service owning the lead store: prospect CRUD, CRM pipeline stage
//! transitions, dashboard stats, and the Meta Lead Center import trigger.

use axum::Router;
use sqlx::SqlitePool;

use crate::meta::MetaClient;

pub mod api;
pub mod meta;
pub mod reconcile;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// API token for request authentication (empty = auth disabled)
    pub api_token: String,
    /// Meta Graph API client
    pub meta: MetaClient,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, api_token: String, meta: MetaClient) -> Self {
        Self {
            db,
            api_token,
            meta,
        }
    }
}

/// Build application router
///
/// Health and build info are public; everything touching lead data sits
/// behind the token middleware.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, put};

    // Protected routes (require authentication)
    let protected = Router::new()
        .route(
            "/prospects",
            get(api::list_prospects)
                .post(api::create_prospect)
                .put(api::import_prospects),
        )
        .route(
            "/prospects/:id",
            get(api::get_prospect)
                .put(api::update_prospect)
                .delete(api::delete_prospect),
        )
        .route("/pipeline", get(api::pipeline_board))
        .route("/pipeline/:id/stage", put(api::set_pipeline_stage))
        .route("/stats", get(api::dashboard_stats))
        .route("/meta/leadcenter", get(api::sync_lead_center))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    // Combine routers
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
