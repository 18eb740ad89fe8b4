//! # workaudit-core
//!
//! Core types for the WorkAudit tamper-evident audit trail:
//! - The audit entry structs shared by the chain store and forward sink
//! - The canonical SHA-256 chain hash, reproducible by external verifiers
//! - The genesis sentinel that roots every installation's chain

pub mod entry;
pub mod hash;

pub use entry::{AuditEntry, StoredAuditEntry};
pub use hash::{entry_hash, GENESIS_HASH};
