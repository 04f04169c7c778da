//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the entity fetch/update contract consumed by the service layer.
//! - Isolate SQLite query details from reconciliation logic.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateKey`) in
//!   addition to store transport errors.
//! - An absent row on fetch is `Ok(None)`, never an error.

pub mod entity_repo;
