//! Schema steps for the staging entity store.
//!
//! # Invariants
//! - Steps run in ascending `version` order inside one transaction.
//! - The applied version is stored in `PRAGMA user_version`.
//! - A store newer than `latest_version()` is never touched.

use crate::db::{DbError, DbResult, StoreOp};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "entities_bkup",
    sql: include_str!("0001_entities_bkup.sql"),
}];

/// Schema version this build writes and expects.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Schema version recorded on `conn`; `0` for a fresh store.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
        .map_err(DbError::at(StoreOp::SchemaCheck))
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `StoreUnavailable { op: Migrate }` when a step fails; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let migrate = DbError::at(StoreOp::Migrate);
    let result = conn.transaction().and_then(|tx| {
        for step in &pending {
            tx.execute_batch(step.sql)?;
            tx.pragma_update(None, "user_version", step.version)?;
            info!(
                "event=db_migrate module=db status=applied version={} name={}",
                step.version, step.name
            );
        }
        tx.commit()
    });
    result.map_err(migrate)?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}
