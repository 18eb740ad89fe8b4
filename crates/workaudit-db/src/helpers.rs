//! Row-to-entry parsing helpers.
//!
//! `libsql::Row` is column-indexed; these helpers isolate the nullable
//! column handling so the repo code stays readable.

use crate::error::StoreError;

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and
/// empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`;
/// nullable columns must go through `get::<Option<String>>()`.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, StoreError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable INTEGER column.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, StoreError> {
    Ok(row.get::<Option<i64>>(idx)?)
}
