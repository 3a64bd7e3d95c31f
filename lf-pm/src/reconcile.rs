//! Import reconciler
//!
//! Given a batch of normalized leads from any source, persists only the ones
//! the store has not seen before. Dedup is by `lead_id` against a set loaded
//! once per batch; the PRIMARY KEY on the table backs this up if two imports
//! ever race.
//!
//! A failed insert is counted and logged but never aborts the batch
//! (collect-and-continue), so one bad record cannot block the rest of an
//! import. The outcome counts always reflect actual successes:
//! `saved + skipped + failed == total`.

use lf_common::db::leads::{existing_lead_ids, insert_lead};
use lf_common::db::models::Lead;
use lf_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Result of one reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    /// Leads newly persisted
    pub saved: usize,
    /// Leads already present in the store (or repeated within the batch)
    pub skipped: usize,
    /// Leads whose insert failed; reported separately, never folded into
    /// saved or skipped
    pub failed: usize,
    /// Size of the incoming batch
    pub total: usize,
}

/// Reconcile a batch of remote leads against the store
///
/// Idempotent: running the same batch twice yields `saved = 0` the second
/// time. If loading the existing-id set fails, the error propagates and the
/// store is left untouched.
pub async fn reconcile(pool: &SqlitePool, remote_leads: Vec<Lead>) -> Result<ReconcileOutcome> {
    let total = remote_leads.len();
    let mut seen = existing_lead_ids(pool).await?;

    let mut saved = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for lead in remote_leads {
        if seen.contains(&lead.lead_id) {
            skipped += 1;
            continue;
        }

        match insert_lead(pool, &lead).await {
            Ok(()) => {
                saved += 1;
                seen.insert(lead.lead_id);
            }
            Err(e) => {
                warn!("Failed to persist lead {}: {}", lead.lead_id, e);
                failed += 1;
            }
        }
    }

    info!(
        "Reconciled {} leads: {} saved, {} skipped, {} failed",
        total, saved, skipped, failed
    );

    Ok(ReconcileOutcome {
        saved,
        skipped,
        failed,
        total,
    })
}
