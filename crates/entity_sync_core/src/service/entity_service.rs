//! Entity reconciliation service.
//!
//! # Responsibility
//! - Compare a staged row against desired field values.
//! - Report the difference (dry run) or write it (apply).
//!
//! # Invariants
//! - Dry runs never write.
//! - Rows whose fields already match are never rewritten.
//! - Service layer remains storage-agnostic.

use crate::model::entity::{EntityFields, EntityRecord, EntityRowId, EntityUpdate};
use crate::repo::entity_repo::{EntityRepository, RepoResult};
use log::info;

/// Whether `reconcile` may write to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    DryRun,
    Apply,
}

impl ApplyMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::DryRun => "dry_run",
            Self::Apply => "apply",
        }
    }
}

/// Result of reconciling one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No row matches the requested id.
    Missing,
    Unchanged {
        id: EntityRowId,
    },
    /// Dry run: `changed` columns would be rewritten.
    WouldUpdate {
        id: EntityRowId,
        changed: Vec<&'static str>,
    },
    Updated {
        id: EntityRowId,
        changed: Vec<&'static str>,
    },
}

/// Use-case wrapper for the dry-run then apply workflow.
pub struct EntityService<R: EntityRepository> {
    repo: R,
}

impl<R: EntityRepository> EntityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_entity(&self, id: &str) -> RepoResult<Option<EntityRecord>> {
        self.repo.fetch_entity(id)
    }

    /// Writes `update` unconditionally.
    pub fn update_entity(&self, update: &EntityUpdate) -> RepoResult<()> {
        self.repo.update_entity(update)
    }

    /// Brings the entity at `id` to `desired`, or reports what would change.
    ///
    /// # Contract
    /// - Read and write are separate statements; callers running concurrent
    ///   writers against the same row must coordinate themselves.
    /// - Repository errors are returned unchanged.
    pub fn reconcile(
        &self,
        id: &str,
        desired: &EntityFields,
        mode: ApplyMode,
    ) -> RepoResult<ReconcileOutcome> {
        let Some(current) = self.repo.fetch_entity(id)? else {
            info!("event=entity_reconcile module=service status=missing entity_id={id}");
            return Ok(ReconcileOutcome::Missing);
        };

        let changed = current.fields.diff(desired);
        if changed.is_empty() {
            info!(
                "event=entity_reconcile module=service status=unchanged entity_id={id} row_id={}",
                current.id
            );
            return Ok(ReconcileOutcome::Unchanged { id: current.id });
        }

        info!(
            "event=entity_reconcile module=service status=diff mode={} entity_id={id} row_id={} changed={}",
            mode.as_str(),
            current.id,
            changed.join(",")
        );

        match mode {
            ApplyMode::DryRun => Ok(ReconcileOutcome::WouldUpdate {
                id: current.id,
                changed,
            }),
            ApplyMode::Apply => {
                self.repo
                    .update_entity(&EntityUpdate::new(current.id, desired.clone()))?;
                Ok(ReconcileOutcome::Updated {
                    id: current.id,
                    changed,
                })
            }
        }
    }
}
