//! Typed column readers shared by the entity projections.
//!
//! Each reader states its null handling once so the per-entity mappers stay
//! declarative: SQL NULL always becomes `None`, never a sentinel value.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Row;

pub fn id(row: &Row<'_>, col: &str) -> rusqlite::Result<i64> {
    row.get(col)
}

pub fn text(row: &Row<'_>, col: &str) -> rusqlite::Result<String> {
    row.get(col)
}

pub fn opt_text(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<String>> {
    row.get(col)
}

/// NULL and whitespace-only text both read as absent.
pub fn opt_non_blank(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<String>> {
    Ok(opt_text(row, col)?.filter(|s| !s.trim().is_empty()))
}

pub fn date(row: &Row<'_>, col: &str) -> rusqlite::Result<NaiveDate> {
    row.get(col)
}

pub fn opt_date(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
    row.get(col)
}

pub fn time(row: &Row<'_>, col: &str) -> rusqlite::Result<NaiveTime> {
    row.get(col)
}

/// Bind helper for `IN (...)` lists: `?1, ?2, ...`.
pub fn placeholders(n: usize) -> String {
    (1..=n)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn placeholders_are_numbered() {
        assert_eq!(placeholders(1), "?1");
        assert_eq!(placeholders(3), "?1, ?2, ?3");
    }

    #[test]
    fn null_and_blank_read_as_absent() {
        let conn = Connection::open_in_memory().unwrap();
        let (a, b, c) = conn
            .query_row(
                "SELECT NULL AS a, '   ' AS b, 'x' AS c",
                [],
                |r| Ok((opt_non_blank(r, "a")?, opt_non_blank(r, "b")?, opt_non_blank(r, "c")?)),
            )
            .unwrap();
        assert_eq!(a, None);
        assert_eq!(b, None);
        assert_eq!(c.as_deref(), Some("x"));
    }

    #[test]
    fn null_date_is_absent_not_sentinel() {
        let conn = Connection::open_in_memory().unwrap();
        let (none, some) = conn
            .query_row("SELECT NULL AS d1, '1990-04-02' AS d2", [], |r| {
                Ok((opt_date(r, "d1")?, opt_date(r, "d2")?))
            })
            .unwrap();
        assert_eq!(none, None);
        assert_eq!(some, NaiveDate::from_ymd_opt(1990, 4, 2));
    }
}
