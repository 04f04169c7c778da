//! Domain model for staged entity reconciliation.
//!
//! # Responsibility
//! - Define identifier, row and write-payload shapes used by the repository.
//! - Provide the static signature type table.
//!
//! # Invariants
//! - Every row is addressed by a stable primary id and a composite key.
//! - The writable column set is fixed by `EntityFields`.

pub mod entity;
pub mod entity_id;
pub mod signature_type;
