//! Database access layer for Leadflow
//!
//! SQLite-backed storage shared by all services. `init_database` creates the
//! schema on first run and upgrades older databases through versioned
//! migrations.

pub mod init;
pub mod leads;
pub mod migrations;
pub mod models;
pub mod settings;

pub use init::init_database;
pub use models::{Lead, LeadStatus, PipelineStage};
