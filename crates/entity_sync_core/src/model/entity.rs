//! Entity row model for the staging entity table.
//!
//! # Responsibility
//! - Define the row shape read from `t_entities_bkup`.
//! - Make the writable column set an explicit type (`EntityFields`).
//!
//! # Invariants
//! - `id`, `entity_key`, `entity_type_id` and `memo` are read-only here.
//! - Only `EntityFields` members are ever written back.

use crate::model::entity_id::EntityKey;
use serde::{Deserialize, Serialize};

/// Primary row identifier of a staged entity.
pub type EntityRowId = i64;

/// The six columns the reconciliation workflow may rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFields {
    /// Seconds between automatic renewals.
    pub auto_renew_period: i64,
    pub deleted: bool,
    pub ed25519_public_key_hex: Option<String>,
    /// Unix epoch nanoseconds.
    #[serde(rename = "exp_time_ns")]
    pub expiration_time_ns: Option<i64>,
    /// Serialized public-key structure, opaque to this crate.
    pub key: Option<Vec<u8>>,
    /// Row id of the proxy account entity.
    pub proxy_account_id: Option<EntityRowId>,
}

impl EntityFields {
    /// Column names whose values differ between `self` and `other`.
    ///
    /// Order follows the table column order so dry-run reports are stable.
    pub fn diff(&self, other: &EntityFields) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.auto_renew_period != other.auto_renew_period {
            changed.push("auto_renew_period");
        }
        if self.deleted != other.deleted {
            changed.push("deleted");
        }
        if self.ed25519_public_key_hex != other.ed25519_public_key_hex {
            changed.push("ed25519_public_key_hex");
        }
        if self.expiration_time_ns != other.expiration_time_ns {
            changed.push("exp_time_ns");
        }
        if self.key != other.key {
            changed.push("key");
        }
        if self.proxy_account_id != other.proxy_account_id {
            changed.push("proxy_account_id");
        }
        changed
    }
}

/// One row of the staging entity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityRowId,
    pub entity_key: EntityKey,
    pub entity_type_id: i32,
    pub memo: String,
    #[serde(flatten)]
    pub fields: EntityFields,
}

impl EntityRecord {
    /// Builds the write payload for this row's current field values.
    pub fn to_update(&self) -> EntityUpdate {
        EntityUpdate {
            id: self.id,
            fields: self.fields.clone(),
        }
    }
}

/// Write payload: new field values keyed by primary row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityUpdate {
    pub id: EntityRowId,
    #[serde(flatten)]
    pub fields: EntityFields,
}

impl EntityUpdate {
    pub fn new(id: EntityRowId, fields: EntityFields) -> Self {
        Self { id, fields }
    }
}

impl From<&EntityRecord> for EntityUpdate {
    fn from(value: &EntityRecord) -> Self {
        value.to_update()
    }
}
