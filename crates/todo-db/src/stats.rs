//! Row and table counts for the post-provisioning report.

use rusqlite::Connection;

use crate::error::DbError;

/// Counts gathered after provisioning. Informational only; nothing here is
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    /// User tables, excluding SQLite-internal ones such as `sqlite_sequence`.
    pub tables: i64,
    /// Rows in `app_info`.
    pub app_info_rows: i64,
    /// Rows in `todos`.
    pub todos_rows: i64,
}

fn count(conn: &Connection, sql: &str) -> Result<i64, DbError> {
    conn.query_row(sql, [], |row| row.get(0))
        .map_err(DbError::Stats)
}

/// Collects [`DatabaseStats`] from a provisioned database.
///
/// # Errors
///
/// Returns `DbError::Stats` if any count query fails, e.g. when the schema
/// has not been applied.
pub fn collect_stats(conn: &Connection) -> Result<DatabaseStats, DbError> {
    Ok(DatabaseStats {
        tables: count(
            conn,
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )?,
        app_info_rows: count(conn, "SELECT COUNT(*) FROM app_info")?,
        todos_rows: count(conn, "SELECT COUNT(*) FROM todos")?,
    })
}
