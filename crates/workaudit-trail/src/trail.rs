//! Audit trail orchestrator.
//!
//! Owns the running chain head and enforces the dual-sink write policy:
//! forward to JSONL first, and only on success insert into the chain
//! store and advance the head. Appends are serialized through a single
//! async mutex — two appends racing on the same head would both record
//! the same `prev_hash` and corrupt the chain.

use tokio::sync::Mutex;
use workaudit_config::StorageConfig;
use workaudit_core::{entry_hash, AuditEntry, StoredAuditEntry, GENESIS_HASH};
use workaudit_db::repos::AuditFilter;
use workaudit_db::AuditDb;

use crate::error::TrailError;
use crate::forward::ForwardSink;
use crate::verify::{verify_entries, ChainVerification};

/// One append as requested by a business-logic caller.
///
/// Callers supply a stable `actor` string (human identity plus device
/// identity) and should append only after the corresponding business
/// mutation is durably applied: a [`TrailError::ForwardFailed`] means
/// the business change proceeded unaudited.
#[derive(Debug, Clone)]
pub struct AppendRequest {
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_uuid: Option<String>,
    pub entity_id: Option<i64>,
    /// Arbitrary structured payload describing the action (old/new
    /// values, etc.). Serialized once at append time; the trail never
    /// interprets it.
    pub details: Option<serde_json::Value>,
}

/// The tamper-evident audit trail: chain store, forward sink, and the
/// process-scoped running head.
///
/// The head is derived state — recomputed from the last persisted entry
/// on open, advanced only inside the append critical section, and never
/// persisted separately, so it cannot drift out of sync with the store.
pub struct AuditTrail {
    db: AuditDb,
    sink: ForwardSink,
    head: Mutex<String>,
}

impl AuditTrail {
    /// Assemble a trail over an already-open store and sink, recovering
    /// the running head from the store's latest entry.
    ///
    /// # Errors
    ///
    /// Returns `TrailError` if the latest entry cannot be read. A store
    /// that exists but is unreadable fails here (or already at
    /// [`AuditDb::open_local`]) instead of being treated as empty
    /// history.
    pub async fn open(db: AuditDb, sink: ForwardSink) -> Result<Self, TrailError> {
        let head = match db.latest_entry().await? {
            Some(latest) => entry_hash(&latest.entry),
            None => GENESIS_HASH.to_string(),
        };
        Ok(Self {
            db,
            sink,
            head: Mutex::new(head),
        })
    }

    /// Open the trail at the locations a [`StorageConfig`] resolves,
    /// creating the base directory on first use.
    ///
    /// # Errors
    ///
    /// Returns `TrailError` if the paths cannot be resolved or either
    /// sink cannot be opened.
    pub async fn open_at(config: &StorageConfig) -> Result<Self, TrailError> {
        let base_dir = config
            .resolved_base_dir()
            .map_err(|e| TrailError::Other(e.into()))?;
        std::fs::create_dir_all(&base_dir).map_err(|e| TrailError::Other(e.into()))?;

        let db_path = config
            .audit_db_path()
            .map_err(|e| TrailError::Other(e.into()))?;
        let db = AuditDb::open_local(&db_path.to_string_lossy())
            .await
            .map_err(TrailError::Store)?;

        let forward_path = config
            .forward_path()
            .map_err(|e| TrailError::Other(e.into()))?;
        let sink = ForwardSink::new(forward_path)?;

        Self::open(db, sink).await
    }

    /// Record one action: build the entry, forward it, commit it,
    /// advance the head. Returns the stored entry with its assigned id.
    ///
    /// The whole sequence runs under the append lock; within one process
    /// appends are strictly ordered and each observes the effect of the
    /// previous one.
    ///
    /// # Errors
    ///
    /// - [`TrailError::ForwardFailed`] — the forward sink refused the
    ///   entry; nothing was written to the chain store and the head is
    ///   unchanged.
    /// - [`TrailError::Store`] — the insert failed after the forward
    ///   succeeded; the sinks have diverged (logged at error level).
    /// - [`TrailError::Details`] — the details payload did not
    ///   serialize; nothing was written anywhere.
    pub async fn append(&self, request: AppendRequest) -> Result<StoredAuditEntry, TrailError> {
        let details = request
            .details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut head = self.head.lock().await;

        let entry = AuditEntry::new(
            request.actor,
            request.action,
            request.entity_type,
            request.entity_uuid,
            request.entity_id,
            details,
            head.as_str(),
        );

        if !self.sink.forward(&entry) {
            return Err(TrailError::ForwardFailed);
        }

        let id = match self.db.append_entry(&entry).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    uuid = %entry.uuid,
                    "Chain store insert failed after forward succeeded; sinks have diverged: {e}"
                );
                return Err(e.into());
            }
        };

        *head = entry_hash(&entry);
        tracing::debug!(id, uuid = %entry.uuid, action = %entry.action, "Audit entry committed");

        Ok(StoredAuditEntry { id, entry })
    }

    /// Query the chain store, ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `TrailError` if the query fails.
    pub async fn query(&self, filter: &AuditFilter) -> Result<Vec<StoredAuditEntry>, TrailError> {
        Ok(self.db.query_entries(filter).await?)
    }

    /// Verify the full chain from the genesis sentinel.
    ///
    /// # Errors
    ///
    /// Returns `TrailError` if the rows cannot be read.
    pub async fn verify(&self) -> Result<ChainVerification, TrailError> {
        let entries = self.db.query_entries(&AuditFilter::default()).await?;
        Ok(verify_entries(&entries, true))
    }

    /// Verify entries with `from_id <= id <= to_id`. The sentinel is
    /// only checked when the range includes the chain root.
    ///
    /// # Errors
    ///
    /// Returns `TrailError` if the rows cannot be read.
    pub async fn verify_range(
        &self,
        from_id: i64,
        to_id: i64,
    ) -> Result<ChainVerification, TrailError> {
        let entries = self.db.entries_in_id_range(from_id, to_id).await?;
        Ok(verify_entries(&entries, from_id <= 1))
    }

    /// The current running head hash (the `prev_hash` the next entry
    /// will carry).
    pub async fn head(&self) -> String {
        self.head.lock().await.clone()
    }

    /// Access the underlying chain store.
    #[must_use]
    pub const fn db(&self) -> &AuditDb {
        &self.db
    }
}
