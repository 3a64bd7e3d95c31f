//! lf-pm (Prospect Manager) - Lead store and import service
//!
//! Owns the leads database and exposes the HTTP surface the dashboard talks
//! to: prospect CRUD, pipeline stage transitions, dashboard stats, and the
//! Meta Lead Center reconciliation trigger.

use anyhow::Result;
use lf_common::config::{RootFolderInitializer, RootFolderResolver};
use lf_common::db::settings::get_setting_or;
use lf_pm::meta::MetaClient;
use lf_pm::{build_router, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification IMMEDIATELY after tracing init
    // Provides instant startup feedback before database delays
    info!(
        "Starting Leadflow Prospect Manager (lf-pm) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Zero-config startup: optional positional root folder, then env var,
    // config file, platform default
    let resolver =
        RootFolderResolver::new("prospect-manager").with_cli_arg(std::env::args().nth(1));
    let root_folder = resolver.resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match lf_common::db::init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    // Load API token (empty disables auth)
    let api_token = get_setting_or(&pool, "api_token", "").await?;
    if api_token.is_empty() {
        info!("API authentication disabled (api_token is empty)");
    } else {
        info!("✓ Loaded API token for request authentication");
    }

    // Meta Graph API client with the configured request timeout
    let timeout_ms: u64 = get_setting_or(&pool, "http_request_timeout_ms", "30000")
        .await?
        .parse()
        .unwrap_or(30000);
    let meta = MetaClient::new(timeout_ms)?;

    // Create application state and router
    let state = AppState::new(pool, api_token, meta);
    let app = build_router(state);

    // Start server on port 5810
    let listener = tokio::net::TcpListener::bind("127.0.0.1:5810").await?;
    info!("lf-pm listening on http://127.0.0.1:5810");
    info!("Health check: http://127.0.0.1:5810/health");

    axum::serve(listener, app).await?;

    Ok(())
}
