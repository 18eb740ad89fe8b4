//! # workaudit-db
//!
//! libSQL chain store for the WorkAudit audit trail.
//!
//! Holds the canonical, queryable, hash-linked audit history in a local
//! `SQLite`-format database. The store is strictly append-only: this
//! crate exposes insert and read operations and nothing else.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — stable API, local file
//! and `:memory:` support.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

use error::StoreError;
use libsql::Builder;

/// Handle to the audit chain database.
///
/// Wraps a libSQL database and connection. Opening runs the embedded
/// migrations; a file that exists but cannot be opened or migrated is
/// an error, never silently treated as empty history.
pub struct AuditDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AuditDb {
    /// Open a local database at the given path, creating it if absent.
    ///
    /// Pass `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let audit_db = Self { db, conn };
        audit_db.run_migrations().await?;
        tracing::debug!("Audit chain store open at {path}");
        Ok(audit_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> AuditDb {
        AuditDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='audit_log'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some(), "audit_log should exist");
    }

    #[tokio::test]
    async fn indexes_exist() {
        let db = test_db().await;

        for index in [
            "idx_audit_log_timestamp",
            "idx_audit_log_entity_uuid",
            "idx_audit_log_entity_type",
        ] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='index' AND name=?1",
                    [index],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "index '{index}' should exist"
            );
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn uuid_unique_constraint() {
        let db = test_db().await;

        db.conn()
            .execute(
                "INSERT INTO audit_log (uuid, timestamp, actor, action, entity_type, prev_hash)
                 VALUES ('u-1', 't', 'a', 'update', 'document', '0')",
                (),
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO audit_log (uuid, timestamp, actor, action, entity_type, prev_hash)
                 VALUES ('u-1', 't', 'a', 'update', 'document', '0')",
                (),
            )
            .await;
        assert!(result.is_err(), "duplicate uuid should be rejected");
    }

    #[tokio::test]
    async fn reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.db");
        let path = path.to_str().unwrap();

        {
            let db = AuditDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO audit_log (uuid, timestamp, actor, action, entity_type, prev_hash)
                     VALUES ('u-1', 't', 'a', 'update', 'document', '0')",
                    (),
                )
                .await
                .unwrap();
        }

        let db = AuditDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT count(*) FROM audit_log", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }
}
