//! Database initialization and lead query tests
//!
//! Verifies first-run schema creation, idempotent re-init, default settings
//! seeding, and the lead query layer round trips.

use lf_common::db::models::Lead;
use lf_common::db::settings::{get_setting, get_setting_or, set_setting};
use lf_common::db::{init_database, leads};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup() -> (SqlitePool, TempDir) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("leadflow.db"))
        .await
        .expect("Should initialize database");
    (pool, dir)
}

#[tokio::test]
async fn test_init_creates_tables() {
    let (pool, _dir) = setup().await;

    for table in ["schema_version", "settings", "leads"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists, "table {} missing", table);
    }
}

#[tokio::test]
async fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("leadflow.db");

    let pool = init_database(&db_path).await.expect("first init");
    let lead = Lead::new_manual("Survivor".to_string());
    leads::insert_lead(&pool, &lead).await.unwrap();
    pool.close().await;

    // Re-opening an existing database must not lose data
    let pool = init_database(&db_path).await.expect("second init");
    assert_eq!(leads::lead_count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_schema_version_recorded() {
    let (pool, _dir) = setup().await;

    let version: i32 =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(version, 2);
}

#[tokio::test]
async fn test_default_settings_seeded() {
    let (pool, _dir) = setup().await;

    assert_eq!(get_setting(&pool, "api_token").await.unwrap().as_deref(), Some(""));
    assert_eq!(
        get_setting(&pool, "meta_api_version").await.unwrap().as_deref(),
        Some("v21.0")
    );
    assert_eq!(
        get_setting_or(&pool, "meta_page_limit", "0").await.unwrap(),
        "100"
    );
    // Empty value falls back to the given default
    assert_eq!(
        get_setting_or(&pool, "meta_access_token", "fallback").await.unwrap(),
        "fallback"
    );
}

#[tokio::test]
async fn test_settings_survive_reinit() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("leadflow.db");

    let pool = init_database(&db_path).await.unwrap();
    set_setting(&pool, "meta_access_token", "EAAB-token").await.unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    assert_eq!(
        get_setting(&pool, "meta_access_token").await.unwrap().as_deref(),
        Some("EAAB-token")
    );
}

#[tokio::test]
async fn test_lead_insert_and_get_round_trip() {
    let (pool, _dir) = setup().await;

    let mut lead = Lead::new_manual("Round Trip".to_string());
    lead.email = Some("rt@example.com".to_string());
    lead.raw_data = Some(serde_json::json!({ "custom_field": ["value"] }));

    leads::insert_lead(&pool, &lead).await.unwrap();

    let fetched = leads::get_lead(&pool, &lead.lead_id)
        .await
        .unwrap()
        .expect("lead exists");
    assert_eq!(fetched.name.as_deref(), Some("Round Trip"));
    assert_eq!(fetched.email.as_deref(), Some("rt@example.com"));
    assert_eq!(fetched.status, "new");
    assert_eq!(fetched.stage, "NEW");
    assert_eq!(
        fetched.raw_data.unwrap()["custom_field"][0],
        serde_json::json!("value")
    );
}

#[tokio::test]
async fn test_duplicate_lead_id_rejected() {
    let (pool, _dir) = setup().await;

    let lead = Lead::new_manual("Original".to_string());
    leads::insert_lead(&pool, &lead).await.unwrap();

    let mut dup = Lead::new_manual("Impostor".to_string());
    dup.lead_id = lead.lead_id.clone();
    let result = leads::insert_lead(&pool, &dup).await;
    assert!(result.is_err(), "duplicate lead_id must be rejected");
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let (pool, _dir) = setup().await;

    let mut lead = Lead::new_manual("Partial".to_string());
    lead.email = Some("keep@example.com".to_string());
    leads::insert_lead(&pool, &lead).await.unwrap();

    let update = leads::LeadUpdate {
        status: Some("contacted".to_string()),
        ..Default::default()
    };
    let found = leads::update_lead(&pool, &lead.lead_id, &update).await.unwrap();
    assert!(found);

    let fetched = leads::get_lead(&pool, &lead.lead_id).await.unwrap().unwrap();
    assert_eq!(fetched.status, "contacted");
    assert_eq!(fetched.email.as_deref(), Some("keep@example.com"));
    assert!(fetched.last_activity >= lead.last_activity);
}

#[tokio::test]
async fn test_set_stage_bumps_last_activity() {
    let (pool, _dir) = setup().await;

    let lead = Lead::new_manual("Mover".to_string());
    leads::insert_lead(&pool, &lead).await.unwrap();

    let found = leads::set_stage(&pool, &lead.lead_id, "PROPOSAL").await.unwrap();
    assert!(found);

    let fetched = leads::get_lead(&pool, &lead.lead_id).await.unwrap().unwrap();
    assert_eq!(fetched.stage, "PROPOSAL");
    assert!(fetched.last_activity >= lead.last_activity);

    // Unknown id reports not found
    let found = leads::set_stage(&pool, "ghost", "WON").await.unwrap();
    assert!(!found);
}

#[tokio::test]
async fn test_stats_queries() {
    let (pool, _dir) = setup().await;

    let mut closing = Lead::new_manual("Closer".to_string());
    closing.status = "closing".to_string();
    closing.revenue_amount = Some(1500.0);
    leads::insert_lead(&pool, &closing).await.unwrap();

    let mut converted = Lead::new_manual("Converted".to_string());
    converted.lead_id = "converted-1".to_string();
    converted.status = "converted".to_string();
    converted.revenue_amount = Some(500.0);
    leads::insert_lead(&pool, &converted).await.unwrap();

    leads::insert_lead(&pool, &Lead::new_manual("Fresh".to_string()))
        .await
        .unwrap();

    assert_eq!(leads::lead_count(&pool).await.unwrap(), 3);

    let by_status = leads::counts_by_status(&pool).await.unwrap();
    assert!(by_status.contains(&("closing".to_string(), 1)));
    assert!(by_status.contains(&("new".to_string(), 1)));

    let revenue = leads::total_revenue(&pool).await.unwrap();
    assert!((revenue - 2000.0).abs() < f64::EPSILON);
}
