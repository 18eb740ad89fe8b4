//! Shared test utilities for workaudit-trail tests.

use std::path::Path;

use workaudit_db::AuditDb;

use crate::forward::ForwardSink;
use crate::trail::{AppendRequest, AuditTrail};

/// Trail over an in-memory chain store with a JSONL sink under `dir`.
pub(crate) async fn test_trail(dir: &Path) -> AuditTrail {
    let db = AuditDb::open_local(":memory:").await.unwrap();
    let sink = ForwardSink::new(dir.join("audit.jsonl")).unwrap();
    AuditTrail::open(db, sink).await.unwrap()
}

/// A representative document-update request targeting `entity_uuid`.
pub(crate) fn request(entity_uuid: &str) -> AppendRequest {
    AppendRequest {
        actor: "alice@dev1".into(),
        action: "update".into(),
        entity_type: "document".into(),
        entity_uuid: Some(entity_uuid.into()),
        entity_id: None,
        details: None,
    }
}
