//! JSONL forward sink.
//!
//! The secondary, write-only copy of the audit history: one
//! self-contained JSON object per line, append-only, never rewritten in
//! place. It exists so an independent reader (external shipping,
//! reconciliation) can parse history without touching the chain store.
//! Uses `serde_jsonlines::append_json_lines` for whole-record appends.

use std::path::{Path, PathBuf};

use workaudit_core::AuditEntry;

use crate::error::TrailError;

/// Appends audit entries to a JSONL file.
///
/// The orchestrator calls [`ForwardSink::forward`] before every chain
/// store insert; a `false` return aborts the whole append.
pub struct ForwardSink {
    path: PathBuf,
}

impl ForwardSink {
    /// Create a sink writing to the given file path.
    ///
    /// Creates the parent directory if it doesn't exist. The file itself
    /// is created on first append.
    ///
    /// # Errors
    ///
    /// Returns `TrailError` if the parent directory cannot be created.
    pub fn new(path: PathBuf) -> Result<Self, TrailError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TrailError::Other(e.into()))?;
        }
        Ok(Self { path })
    }

    /// Append one entry as a single JSON line. Returns `true` on success.
    ///
    /// Never errors upward: any failure (disk full, permissions,
    /// serialization) is reported as `false` and logged — the
    /// orchestrator decides what a failure means.
    pub fn forward(&self, entry: &AuditEntry) -> bool {
        match serde_jsonlines::append_json_lines(&self.path, [entry]) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    uuid = %entry.uuid,
                    path = %self.path.display(),
                    "Forward sink append failed: {e}"
                );
                false
            }
        }
    }

    /// The file this sink appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
