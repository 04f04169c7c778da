//! Staged entity reconciliation core.
//! Resolves composite entity ids to staging rows and writes field updates back.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{parse_log_dir, parse_log_level, ConfigError, SyncConfig};
pub use db::{DbError, StoreOp};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{EntityFields, EntityRecord, EntityRowId, EntityUpdate};
pub use model::entity_id::{parse_entity_id, EntityIdError, EntityKey};
pub use model::signature_type::{signature_type_name, SignatureType, UNKNOWN_SIGNATURE_TYPE};
pub use repo::entity_repo::{EntityRepository, RepoError, RepoResult, SqliteEntityRepository};
pub use service::entity_service::{ApplyMode, EntityService, ReconcileOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
