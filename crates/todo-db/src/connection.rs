//! Connection opening and configuration.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::DbError;

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
        }
    }
}

/// Opens (creating if absent) a SQLite database with foreign keys enabled.
///
/// `PRAGMA foreign_keys` is connection-scoped, so every connection that
/// wants enforcement has to set it again. This function verifies the pragma
/// took effect before handing the connection back.
///
/// # Errors
///
/// Returns `DbError::Open` if the file cannot be opened or the pragmas fail,
/// and `DbError::ForeignKeysDisabled` if SQLite refuses to enable them.
pub fn open_connection(path: &Path, settings: DbRuntimeSettings) -> Result<Connection, DbError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    let open_err = |source: rusqlite::Error| DbError::Open {
        path: path.display().to_string(),
        source,
    };

    let conn = Connection::open_with_flags(path, flags).map_err(open_err)?;
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = {};",
        settings.busy_timeout_ms
    ))
    .map_err(open_err)?;

    let fk: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .map_err(open_err)?;
    if fk != 1 {
        return Err(DbError::ForeignKeysDisabled(fk));
    }

    tracing::debug!(path = %path.display(), "opened database connection");
    Ok(conn)
}

/// Checks that an existing database file can be opened and read.
///
/// The probe reads `sqlite_master`, which forces SQLite to parse the file
/// header; a file that is not a database fails here rather than later.
///
/// # Errors
///
/// Returns `DbError::Probe` if the file cannot be opened or queried.
pub fn probe_database(path: &Path) -> Result<(), DbError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(DbError::Probe)?;
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(DbError::Probe)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_connection_enables_foreign_keys_and_busy_timeout() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("fk.db");
        let settings = DbRuntimeSettings {
            busy_timeout_ms: 2_500,
        };

        let conn = open_connection(&path, settings).expect("should open database");

        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .expect("should query foreign_keys");
        assert_eq!(fk, 1, "foreign keys should be enabled");

        let busy_timeout: i32 = conn
            .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
            .expect("should query busy_timeout");
        assert_eq!(busy_timeout, 2_500, "busy timeout should match settings");
        assert!(path.exists(), "database file should be created on open");
    }

    #[test]
    fn accessibility_check_accepts_valid_database() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("valid.db");
        drop(open_connection(&path, DbRuntimeSettings::default()).expect("should open"));

        probe_database(&path).expect("probe should succeed on a real database");
    }

    #[test]
    fn accessibility_check_rejects_non_database_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, vec![0x5a_u8; 4096]).expect("should write garbage");

        let err = probe_database(&path).expect_err("probe should fail on garbage");
        assert!(matches!(err, DbError::Probe(_)), "unexpected error: {err:?}");
    }
}
