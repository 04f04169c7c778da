//! Entity repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Resolve composite entity ids to rows of `t_entities_bkup`.
//! - Write the mutable column set back by primary row id.
//!
//! # Invariants
//! - Reads match shard, realm and num exactly; more than one match is an error.
//! - Writes touch only the six `EntityFields` columns.
//! - Nothing is cached between calls.

use crate::db::migrations::{current_version, latest_version};
use crate::db::{DbError, StoreOp};
use crate::model::entity::{EntityFields, EntityRecord, EntityRowId, EntityUpdate};
use crate::model::entity_id::{parse_entity_id, EntityIdError, EntityKey};
use log::{debug, trace};
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTITY_SELECT_SQL: &str = r#"SELECT
    id,
    entity_shard,
    entity_realm,
    entity_num,
    entity_type_id,
    memo,
    auto_renew_period,
    deleted,
    ed25519_public_key_hex,
    exp_time_ns,
    "key",
    proxy_account_id
FROM t_entities_bkup"#;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity lookups and writes.
#[derive(Debug)]
pub enum RepoError {
    InvalidId(EntityIdError),
    Db(DbError),
    NotFound(EntityRowId),
    /// More than one row shares the same composite key.
    DuplicateKey {
        key: EntityKey,
        count: usize,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entity row not found: id={id}"),
            Self::DuplicateKey { key, count } => {
                write!(f, "entity key {key} matches {count} rows; expected at most one")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted entity data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match required {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidId(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::DuplicateKey { .. }
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<EntityIdError> for RepoError {
    fn from(value: EntityIdError) -> Self {
        Self::InvalidId(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl RepoError {
    fn store(op: StoreOp) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Db(DbError::StoreUnavailable { op, source })
    }
}

/// Repository interface for staged entity reads and writes.
pub trait EntityRepository {
    /// Resolves a textual id and returns the matching row, if any.
    fn fetch_entity(&self, id: &str) -> RepoResult<Option<EntityRecord>>;
    /// Returns the row stored under `key`, if any.
    fn fetch_by_key(&self, key: &EntityKey) -> RepoResult<Option<EntityRecord>>;
    /// Rewrites the mutable fields of the row with `update.id`.
    ///
    /// Returns `NotFound` when no row has that id.
    fn update_entity(&self, update: &EntityUpdate) -> RepoResult<()>;
}

/// SQLite-backed entity repository over a caller-owned connection.
pub struct SqliteEntityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntityRepository<'conn> {
    /// Wraps a connection whose schema is already migrated.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl EntityRepository for SqliteEntityRepository<'_> {
    fn fetch_entity(&self, id: &str) -> RepoResult<Option<EntityRecord>> {
        let key = parse_entity_id(id)?;
        trace!("event=entity_fetch module=repo entity_id={id}");
        self.fetch_by_key(&key)
    }

    fn fetch_by_key(&self, key: &EntityKey) -> RepoResult<Option<EntityRecord>> {
        // Stored components are signed 64-bit; larger values cannot match a row.
        let (Ok(shard), Ok(realm), Ok(num)) = (
            i64::try_from(key.shard),
            i64::try_from(key.realm),
            i64::try_from(key.num),
        ) else {
            return Ok(None);
        };

        let read = || RepoError::store(StoreOp::ReadEntity);
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{ENTITY_SELECT_SQL}
                 WHERE entity_shard = ?1
                   AND entity_realm = ?2
                   AND entity_num = ?3;"
            ))
            .map_err(read())?;

        let mut rows = stmt.query(params![shard, realm, num]).map_err(read())?;
        let Some(row) = rows.next().map_err(read())? else {
            return Ok(None);
        };
        let record = parse_entity_row(row)?;

        let mut count = 1;
        while rows.next().map_err(read())?.is_some() {
            count += 1;
        }
        if count > 1 {
            return Err(RepoError::DuplicateKey { key: *key, count });
        }

        Ok(Some(record))
    }

    fn update_entity(&self, update: &EntityUpdate) -> RepoResult<()> {
        let fields = &update.fields;
        let changed = self.conn.execute(
            r#"UPDATE t_entities_bkup
             SET
                auto_renew_period = ?1,
                deleted = ?2,
                ed25519_public_key_hex = ?3,
                exp_time_ns = ?4,
                "key" = ?5,
                proxy_account_id = ?6
             WHERE id = ?7;"#,
            params![
                fields.auto_renew_period,
                bool_to_int(fields.deleted),
                fields.ed25519_public_key_hex.as_deref(),
                fields.expiration_time_ns,
                fields.key.as_deref(),
                fields.proxy_account_id,
                update.id,
            ],
        )
        .map_err(RepoError::store(StoreOp::WriteEntity))?;

        if changed == 0 {
            return Err(RepoError::NotFound(update.id));
        }

        debug!("event=entity_update module=repo status=ok id={}", update.id);
        Ok(())
    }
}

fn parse_entity_row(row: &Row<'_>) -> RepoResult<EntityRecord> {
    let entity_key = EntityKey::new(
        key_component(row, "entity_shard")?,
        key_component(row, "entity_realm")?,
        key_component(row, "entity_num")?,
    );

    let deleted = match column::<i64>(row, "deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid deleted value `{other}` in t_entities_bkup.deleted"
            )));
        }
    };

    Ok(EntityRecord {
        id: column(row, "id")?,
        entity_key,
        entity_type_id: column(row, "entity_type_id")?,
        memo: column(row, "memo")?,
        fields: EntityFields {
            auto_renew_period: column(row, "auto_renew_period")?,
            deleted,
            ed25519_public_key_hex: column(row, "ed25519_public_key_hex")?,
            expiration_time_ns: column(row, "exp_time_ns")?,
            key: column(row, "key")?,
            proxy_account_id: column(row, "proxy_account_id")?,
        },
    })
}

fn column<T: FromSql>(row: &Row<'_>, name: &str) -> RepoResult<T> {
    row.get(name).map_err(|err| {
        RepoError::InvalidData(format!("unreadable t_entities_bkup.{name}: {err}"))
    })
}

fn key_component(row: &Row<'_>, name: &str) -> RepoResult<u64> {
    let value: i64 = column(row, name)?;
    u64::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "negative key component `{value}` in t_entities_bkup.{name}"
        ))
    })
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
