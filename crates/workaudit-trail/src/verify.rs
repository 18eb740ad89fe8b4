//! Chain integrity verification.
//!
//! Replays stored entries in id order, recomputing each hash and
//! comparing it with the next entry's `prev_hash`. Verification needs
//! only the chain store's exported rows — a third party can run the same
//! check without the forward sink or this process's state. Broken chains
//! are reported, never repaired.

use workaudit_core::{entry_hash, StoredAuditEntry, GENESIS_HASH};

/// Outcome of a chain verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainVerification {
    /// Whether every link checked out.
    pub valid: bool,
    /// Id of the first entry whose `prev_hash` does not match the
    /// recomputed hash of its predecessor (or the genesis sentinel, for
    /// the chain root). `None` when the chain is valid.
    pub first_broken_id: Option<i64>,
    /// How many entries were examined.
    pub entries_checked: usize,
}

impl ChainVerification {
    fn valid(entries_checked: usize) -> Self {
        Self {
            valid: true,
            first_broken_id: None,
            entries_checked,
        }
    }

    fn broken(id: i64, entries_checked: usize) -> Self {
        Self {
            valid: false,
            first_broken_id: Some(id),
            entries_checked,
        }
    }
}

/// Verify a run of entries, assumed ordered by id ascending.
///
/// `starts_at_root` selects whether the first entry's `prev_hash` must
/// equal the genesis sentinel; pass `false` when verifying a range that
/// begins mid-chain (the predecessor's hash is then unknowable from the
/// range alone).
#[must_use]
pub fn verify_entries(entries: &[StoredAuditEntry], starts_at_root: bool) -> ChainVerification {
    let Some(first) = entries.first() else {
        return ChainVerification::valid(0);
    };

    if starts_at_root && first.entry.prev_hash != GENESIS_HASH {
        return ChainVerification::broken(first.id, entries.len());
    }

    for pair in entries.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.entry.prev_hash != entry_hash(&prev.entry) {
            return ChainVerification::broken(next.id, entries.len());
        }
    }

    ChainVerification::valid(entries.len())
}
