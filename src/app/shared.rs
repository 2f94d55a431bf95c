//! Helpers shared by the entity use cases.

use crate::error::AppError;
use crate::infra::row::placeholders;
use rusqlite::{params_from_iter, Connection};

/// Trim a required name field; blank is a validation error.
pub(crate) fn required_name(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank reads as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Sorted, de-duplicated copy of an id set.
pub(crate) fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut out = ids.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}

/// Ids bound per `IN (...)` statement, well under SQLite's variable limit.
pub(crate) const DELETE_CHUNK: usize = 500;

/// `DELETE FROM {table} WHERE {column} IN (...)`, one statement per chunk of
/// ids; returns rows removed. `table` and `column` are compile-time names,
/// never user input. Callers wanting all-or-nothing pass a transaction.
pub(crate) fn delete_where_in(
    conn: &Connection,
    table: &'static str,
    column: &'static str,
    ids: &[i64],
) -> Result<usize, AppError> {
    let mut removed = 0;
    for chunk in ids.chunks(DELETE_CHUNK) {
        let sql = format!(
            "DELETE FROM {table} WHERE {column} IN ({})",
            placeholders(chunk.len())
        );
        removed += conn.execute(&sql, params_from_iter(chunk.iter()))?;
    }
    Ok(removed)
}
