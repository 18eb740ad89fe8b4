//! Audit chain repository.
//!
//! Append-only rows hash-linked via `prev_hash`. Supports dynamic
//! filtering by entity and time range; ordering is always id ascending,
//! which is append order.

use chrono::{DateTime, SecondsFormat, Utc};
use workaudit_core::{AuditEntry, StoredAuditEntry};

use crate::error::StoreError;
use crate::helpers::{get_opt_i64, get_opt_string};
use crate::AuditDb;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_uuid: Option<String>,
    pub entity_type: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

const ENTRY_COLUMNS: &str =
    "id, uuid, timestamp, actor, action, entity_type, entity_uuid, entity_id, details, prev_hash";

impl AuditDb {
    /// Insert an entry and return its assigned sequence id.
    ///
    /// Callers must hold the orchestrator's append lock: id assignment is
    /// atomic per connection, but the read of `last_insert_rowid` assumes
    /// no interleaved insert on the same connection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the INSERT fails.
    pub async fn append_entry(&self, entry: &AuditEntry) -> Result<i64, StoreError> {
        self.conn()
            .execute(
                "INSERT INTO audit_log
                     (uuid, timestamp, actor, action, entity_type, entity_uuid, entity_id, details, prev_hash, sync_status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 'local_only')",
                libsql::params![
                    entry.uuid.as_str(),
                    entry.timestamp.as_str(),
                    entry.actor.as_str(),
                    entry.action.as_str(),
                    entry.entity_type.as_str(),
                    entry.entity_uuid.as_deref(),
                    entry.entity_id,
                    entry.details.as_deref(),
                    entry.prev_hash.as_str()
                ],
            )
            .await?;
        Ok(self.conn().last_insert_rowid())
    }

    /// The most recently appended entry (highest id), if any.
    ///
    /// Used by the orchestrator to reconstruct the running chain head on
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a row cannot be parsed.
    pub async fn latest_entry(&self) -> Result<Option<StoredAuditEntry>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {ENTRY_COLUMNS} FROM audit_log ORDER BY id DESC LIMIT 1"),
                (),
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(parse_entry_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Query entries with optional filters, ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a row cannot be parsed.
    pub async fn query_entries(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<StoredAuditEntry>, StoreError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref eu) = filter.entity_uuid {
            params.push(libsql::Value::Text(eu.clone()));
            conditions.push(format!("entity_uuid = ?{}", params.len()));
        }
        if let Some(ref et) = filter.entity_type {
            params.push(libsql::Value::Text(et.clone()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(since) = filter.since {
            params.push(libsql::Value::Text(format_ts(since)));
            conditions.push(format!("timestamp >= ?{}", params.len()));
        }
        if let Some(until) = filter.until {
            params.push(libsql::Value::Text(format_ts(until)));
            conditions.push(format!("timestamp <= ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = filter
            .limit
            .map(|l| format!("LIMIT {l}"))
            .unwrap_or_default();

        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM audit_log {where_clause} ORDER BY id ASC {limit_clause}"
        );

        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(parse_entry_row(&row)?);
        }
        Ok(entries)
    }

    /// Entries with `from_id <= id <= to_id`, ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a row cannot be parsed.
    pub async fn entries_in_id_range(
        &self,
        from_id: i64,
        to_id: i64,
    ) -> Result<Vec<StoredAuditEntry>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {ENTRY_COLUMNS} FROM audit_log
                     WHERE id >= ?1 AND id <= ?2 ORDER BY id ASC"
                ),
                libsql::params![from_id, to_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(parse_entry_row(&row)?);
        }
        Ok(entries)
    }
}

/// Timestamps are stored in the exact format `AuditEntry::new` emits, so
/// range filters compare lexicographically.
fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_entry_row(row: &libsql::Row) -> Result<StoredAuditEntry, StoreError> {
    Ok(StoredAuditEntry {
        id: row.get::<i64>(0)?,
        entry: AuditEntry {
            uuid: row.get::<String>(1)?,
            timestamp: row.get::<String>(2)?,
            actor: row.get::<String>(3)?,
            action: row.get::<String>(4)?,
            entity_type: row.get::<String>(5)?,
            entity_uuid: get_opt_string(row, 6)?,
            entity_id: get_opt_i64(row, 7)?,
            details: get_opt_string(row, 8)?,
            prev_hash: row.get::<String>(9)?,
        },
    })
}
