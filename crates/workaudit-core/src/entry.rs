//! Audit entry structs.
//!
//! An [`AuditEntry`] is fully populated before either sink sees it; the
//! chain store assigns the sequence id on insert, producing a
//! [`StoredAuditEntry`]. Entries are immutable once written — there is no
//! update or delete surface anywhere in this workspace.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single audit record, as forwarded to the JSONL sink and inserted
/// into the chain store.
///
/// `timestamp` is kept as the RFC 3339 string produced at creation time
/// rather than a parsed `DateTime`: the exact byte sequence is a hash
/// input, and re-formatting a parsed value must never change the hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEntry {
    /// Globally unique id, generated before either write. Used for
    /// deduplication and as the cross-sink reference.
    pub uuid: String,
    /// RFC 3339 UTC instant of creation. Assigned once, never mutated.
    pub timestamp: String,
    /// Who performed the action: human identity plus device identity,
    /// formatted by the caller (e.g. `"alice@dev1"`).
    pub actor: String,
    /// Short verb tag: `"update"`, `"status_change"`, `"review"`,
    /// `"delete"`, ... Open string, not an enum, so new actions need no
    /// schema change.
    pub action: String,
    /// Kind of business object the action targets (e.g. `"document"`).
    pub entity_type: String,
    /// Durable cross-store reference to the target entity.
    pub entity_uuid: Option<String>,
    /// Store-local convenience key for the target entity.
    pub entity_id: Option<i64>,
    /// Opaque pre-serialized JSON payload describing the action. The
    /// trail hashes and stores it verbatim, never interprets it.
    pub details: Option<String>,
    /// Chain hash of the immediately preceding entry, or
    /// [`crate::GENESIS_HASH`] for the first entry of an installation.
    pub prev_hash: String,
}

impl AuditEntry {
    /// Build a fresh entry with a new uuid and the current UTC time.
    ///
    /// `prev_hash` is the caller's running chain head; the orchestrator
    /// is the only intended caller.
    #[must_use]
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_uuid: Option<String>,
        entity_id: Option<i64>,
        details: Option<String>,
        prev_hash: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            actor: actor.into(),
            action: action.into(),
            entity_type: entity_type.into(),
            entity_uuid,
            entity_id,
            details,
            prev_hash: prev_hash.into(),
        }
    }
}

/// An entry as persisted in the chain store, with its assigned sequence id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredAuditEntry {
    /// Monotonically increasing local sequence number. Assigned by the
    /// chain store on insert; never reused.
    pub id: i64,
    #[serde(flatten)]
    pub entry: AuditEntry,
}
