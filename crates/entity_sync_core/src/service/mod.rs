//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into reconciliation use cases.
//! - Keep CLI callers decoupled from storage details.

pub mod entity_service;
