//! Canonical chain hash.
//!
//! Each stored entry's hash becomes the `prev_hash` of its successor,
//! forming a singly-linked tamper-evident sequence. The hash must be
//! reproducible bit-for-bit by a third party holding only the exported
//! rows, so the payload layout here is a wire format: changing it breaks
//! verification of every existing installation.

use sha2::{Digest, Sha256};

use crate::entry::AuditEntry;

/// `prev_hash` of the first entry in an installation's history.
pub const GENESIS_HASH: &str = "0";

/// SHA-256 over the `|`-joined entry fields, rendered lowercase hex.
///
/// Field order: `uuid | timestamp | actor | action | entity_type |
/// entity_uuid | entity_id | details | prev_hash`. Absent optionals
/// canonicalize to the empty string (`entity_uuid`, `details`) or `0`
/// (`entity_id`).
#[must_use]
pub fn entry_hash(entry: &AuditEntry) -> String {
    let payload = format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}",
        entry.uuid,
        entry.timestamp,
        entry.actor,
        entry.action,
        entry.entity_type,
        entry.entity_uuid.as_deref().unwrap_or(""),
        entry.entity_id.unwrap_or(0),
        entry.details.as_deref().unwrap_or(""),
        entry.prev_hash,
    );
    let digest = Sha256::digest(payload.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> AuditEntry {
        AuditEntry {
            uuid: "u-1".into(),
            timestamp: "2026-01-02T03:04:05.678901+00:00".into(),
            actor: "alice@dev1".into(),
            action: "status_change".into(),
            entity_type: "document".into(),
            entity_uuid: Some("d-9".into()),
            entity_id: Some(42),
            details: Some(r#"{"old":"Draft","new":"Reviewed"}"#.into()),
            prev_hash: GENESIS_HASH.into(),
        }
    }

    #[test]
    fn known_vector() {
        // SHA-256("u-1|2026-01-02T03:04:05.678901+00:00|alice@dev1|status_change|document|d-9|42|{"old":"Draft","new":"Reviewed"}|0")
        assert_eq!(
            entry_hash(&sample()),
            "d6d59293e0c0ab30e93ba7f069dcc408a77e9a36c134fdf7791f9aa335a2d9ec"
        );
    }

    #[test]
    fn known_vector_absent_optionals() {
        let entry = AuditEntry {
            uuid: "u-1".into(),
            timestamp: "ts".into(),
            actor: "alice".into(),
            action: "update".into(),
            entity_type: "document".into(),
            entity_uuid: None,
            entity_id: None,
            details: None,
            prev_hash: GENESIS_HASH.into(),
        };
        // entity_uuid -> "", entity_id -> 0, details -> ""
        assert_eq!(
            entry_hash(&entry),
            "45be0de4fc4d266ca42fda0d795003fbb0bf7c69906fbfeecab61cc14ffc33b8"
        );
    }

    #[test]
    fn deterministic_for_identical_fields() {
        assert_eq!(entry_hash(&sample()), entry_hash(&sample()));
    }

    #[test]
    fn every_field_is_hash_sensitive() {
        let base = entry_hash(&sample());

        let mut e = sample();
        e.uuid.push('x');
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.timestamp.push('x');
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.actor = "alice@dev2".into();
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.action = "status_chang".into();
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.entity_type = "Document".into();
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.entity_uuid = Some("d-8".into());
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.entity_id = Some(43);
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.details = Some(r#"{"old":"Draft","new":"Rejected"}"#.into());
        assert_ne!(entry_hash(&e), base);

        let mut e = sample();
        e.prev_hash = base.clone();
        assert_ne!(entry_hash(&e), base);
    }

    #[test]
    fn rendered_as_lowercase_hex() {
        let h = entry_hash(&sample());
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
