use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, Params, Row};

/// Timestamp written to `created_at` / `updated_at` columns.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// First row mapped through `map`, or `None` when the query returned nothing.
pub fn query_optional<T>(
    conn: &Connection,
    sql: &str,
    params: impl Params,
    map: impl FnOnce(&Row<'_>) -> Result<T>,
) -> Result<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    match rows.next()? {
        Some(row) => map(row).map(Some),
        None => Ok(None),
    }
}
