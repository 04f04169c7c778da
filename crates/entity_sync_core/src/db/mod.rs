//! Staging store bootstrap and failure taxonomy.
//!
//! # Responsibility
//! - Open the staging store and bring its schema up to date.
//! - Describe store failures by the operation that hit them.
//!
//! # Invariants
//! - Every SQLite failure is reported as `StoreUnavailable` with its `StoreOp`.
//! - Repositories must not touch entity rows before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Store operation that was in flight when SQLite failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Open,
    Configure,
    SchemaCheck,
    Migrate,
    ReadEntity,
    WriteEntity,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Configure => "configure",
            Self::SchemaCheck => "schema_check",
            Self::Migrate => "migrate",
            Self::ReadEntity => "read_entity",
            Self::WriteEntity => "write_entity",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// The connection or a statement could not be used.
    StoreUnavailable {
        op: StoreOp,
        source: rusqlite::Error,
    },
    /// The store was written by a newer build of this crate.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Adapter for `map_err` that tags a SQLite failure with `op`.
    pub fn at(op: StoreOp) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::StoreUnavailable { op, source }
    }

    /// Operation that failed, when the failure came from SQLite.
    pub fn op(&self) -> Option<StoreOp> {
        match self {
            Self::StoreUnavailable { op, .. } => Some(*op),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreUnavailable { op, source } => {
                write!(f, "staging store unavailable during {}: {source}", op.as_str())
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "staging store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreUnavailable { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
