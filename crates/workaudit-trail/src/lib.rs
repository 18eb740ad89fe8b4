//! # workaudit-trail
//!
//! Forward sink and orchestrator for the WorkAudit tamper-evident audit
//! trail.
//!
//! Every mutating action on a business record is recorded as a
//! hash-chained entry in two places: the JSONL forward sink (an
//! independent, line-oriented copy) and the libSQL chain store (the
//! canonical queryable history). The policy is forward-then-commit — an
//! entry exists in the chain store only if the forward sink durably
//! accepted it first.
//!
//! # Example
//!
//! ```no_run
//! use workaudit_db::AuditDb;
//! use workaudit_trail::{AppendRequest, AuditTrail, ForwardSink};
//!
//! # async fn run() -> Result<(), workaudit_trail::TrailError> {
//! let db = AuditDb::open_local("workaudit_audit.db").await?;
//! let sink = ForwardSink::new("audit_forward/audit.jsonl".into())?;
//! let trail = AuditTrail::open(db, sink).await?;
//!
//! trail
//!     .append(AppendRequest {
//!         actor: "alice@dev1".into(),
//!         action: "status_change".into(),
//!         entity_type: "document".into(),
//!         entity_uuid: Some("u1".into()),
//!         entity_id: Some(42),
//!         details: Some(serde_json::json!({"old": "Draft", "new": "Reviewed"})),
//!     })
//!     .await?;
//!
//! let result = trail.verify().await?;
//! assert!(result.valid);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod forward;
pub mod trail;
pub mod verify;

#[cfg(test)]
mod test_support;

pub use error::TrailError;
pub use forward::ForwardSink;
pub use trail::{AppendRequest, AuditTrail};
pub use verify::{verify_entries, ChainVerification};

// Re-exported so callers can build filters without a direct
// workaudit-db dependency.
pub use workaudit_db::repos::AuditFilter;
