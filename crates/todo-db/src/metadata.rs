//! Application metadata stored in the `app_info` key-value table.

use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::error::DbError;

/// The fixed `app_info` rows written on every run, as `(key, value)`.
pub const APP_METADATA: &[(&str, &str)] = &[
    ("project_name", "database"),
    ("version", "0.1.0"),
    ("author", "John Doe"),
    ("description", ""),
];

/// Writes every [`APP_METADATA`] pair, replacing any existing row with the
/// same key.
///
/// `INSERT OR REPLACE` deletes the conflicting row and inserts a fresh one,
/// so `id` and `created_at` of a replaced key are renewed.
///
/// # Errors
///
/// Returns `DbError::Metadata` naming the key whose write failed.
pub fn upsert_metadata(conn: &Connection) -> Result<usize, DbError> {
    for &(key, value) in APP_METADATA {
        conn.execute(
            "INSERT OR REPLACE INTO app_info (key, value) VALUES (?1, ?2)",
            [key, value],
        )
        .map_err(|source| DbError::Metadata { key, source })?;
    }

    tracing::info!(keys = APP_METADATA.len(), "upserted app_info metadata");
    Ok(APP_METADATA.len())
}

/// Reads the whole `app_info` table into a key-ordered map.
///
/// # Errors
///
/// Returns `DbError::MetadataRead` if the table cannot be read.
pub fn read_metadata(conn: &Connection) -> Result<BTreeMap<String, Option<String>>, DbError> {
    let mut stmt = conn
        .prepare("SELECT key, value FROM app_info")
        .map_err(DbError::MetadataRead)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .map_err(DbError::MetadataRead)?;

    let mut map = BTreeMap::new();
    for row in rows {
        let (key, value) = row.map_err(DbError::MetadataRead)?;
        map.insert(key, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ensure_schema;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        ensure_schema(&conn).expect("schema should apply");
        conn
    }

    fn expected() -> BTreeMap<String, Option<String>> {
        APP_METADATA
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    #[test]
    fn upsert_writes_all_keys() {
        let conn = test_db();
        let written = upsert_metadata(&conn).expect("upsert should succeed");
        assert_eq!(written, 4);
        assert_eq!(read_metadata(&conn).expect("should read"), expected());
    }

    #[test]
    fn upsert_overwrites_stale_values() {
        let conn = test_db();
        conn.execute(
            "INSERT INTO app_info (key, value) VALUES ('version', '9.9.9'), ('author', NULL)",
            [],
        )
        .expect("should insert stale rows");

        upsert_metadata(&conn).expect("upsert should succeed");

        let meta = read_metadata(&conn).expect("should read");
        assert_eq!(meta, expected());
    }

    #[test]
    fn upsert_leaves_unrelated_keys_alone() {
        let conn = test_db();
        conn.execute(
            "INSERT INTO app_info (key, value) VALUES ('theme', 'dark')",
            [],
        )
        .expect("should insert extra row");

        upsert_metadata(&conn).expect("upsert should succeed");

        let meta = read_metadata(&conn).expect("should read");
        assert_eq!(meta.get("theme"), Some(&Some("dark".to_string())));
        assert_eq!(meta.len(), 5);
    }

    #[test]
    fn read_without_schema_reports_metadata_error() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        let err = read_metadata(&conn).expect_err("missing app_info should fail");
        assert!(matches!(err, DbError::MetadataRead(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn upsert_twice_keeps_one_row_per_key() {
        let conn = test_db();
        upsert_metadata(&conn).expect("first upsert");
        upsert_metadata(&conn).expect("second upsert");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM app_info", [], |row| row.get(0))
            .expect("should count rows");
        assert_eq!(count, 4);
    }
}
