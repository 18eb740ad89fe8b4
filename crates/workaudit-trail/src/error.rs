//! Audit trail error types.

use thiserror::Error;
use workaudit_db::error::StoreError;

/// Errors from trail operations.
#[derive(Debug, Error)]
pub enum TrailError {
    /// The forward sink could not durably append the entry. The chain
    /// store was left untouched and the running head is unchanged: the
    /// triggering business action is now under-audited, which callers
    /// must surface to an operator rather than swallow.
    #[error("Forward sink rejected the entry; chain store left untouched")]
    ForwardFailed,

    /// The chain store failed after the forward sink had already
    /// accepted the entry. The two sinks have permanently diverged; the
    /// JSONL copy holds an entry absent from the chain, recoverable only
    /// by an out-of-band reconciliation job.
    #[error("Chain store error: {0}")]
    Store(#[from] StoreError),

    /// The caller-supplied details payload could not be serialized.
    #[error("Could not serialize details payload: {0}")]
    Details(#[from] serde_json::Error),

    /// Catch-all for unexpected errors (e.g., sink directory creation).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
