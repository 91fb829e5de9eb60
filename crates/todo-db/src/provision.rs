//! The database half of provisioning: open, create, upsert, seed, commit,
//! count.

use std::path::Path;

use crate::connection::{open_connection, DbRuntimeSettings};
use crate::error::DbError;
use crate::metadata::upsert_metadata;
use crate::schema::ensure_schema;
use crate::seed::{seed_todos, SeedOutcome};
use crate::stats::{collect_stats, DatabaseStats};

/// Inputs for [`provision_database`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Insert the sample todos when the table is empty.
    pub seed_todos: bool,
    /// Connection tunables.
    pub runtime: DbRuntimeSettings,
}

/// Result of a successful [`provision_database`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Schema objects that did not exist before this run.
    pub created_objects: usize,
    /// `app_info` rows written.
    pub metadata_rows: usize,
    /// What the seeding step did.
    pub seed: SeedOutcome,
    /// Counts taken after commit.
    pub stats: DatabaseStats,
}

/// Brings the database at `path` to the target schema and metadata state.
///
/// Schema creation, the metadata upsert and the optional seed share one
/// transaction, so a failure part-way leaves the file as it was. Statistics
/// are read after the commit. The connection is closed before returning.
///
/// # Errors
///
/// Any failure is returned as a `DbError`; nothing is retried.
pub fn provision_database(
    path: &Path,
    options: ProvisionOptions,
) -> Result<ProvisionReport, DbError> {
    let conn = open_connection(path, options.runtime)?;

    let tx = conn
        .unchecked_transaction()
        .map_err(DbError::Transaction)?;

    let created_objects = ensure_schema(&tx)?;
    let metadata_rows = upsert_metadata(&tx)?;
    let seed = seed_todos(&tx, options.seed_todos)?;
    tracing::info!(outcome = %seed, "todo seed step finished");

    tx.commit().map_err(DbError::Transaction)?;

    let stats = collect_stats(&conn)?;
    conn.close().map_err(|(_, e)| DbError::Transaction(e))?;

    Ok(ProvisionReport {
        created_objects,
        metadata_rows,
        seed,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provision_fresh_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("fresh.db");

        let report =
            provision_database(&path, ProvisionOptions::default()).expect("should provision");

        assert_eq!(report.created_objects, 4);
        assert_eq!(report.metadata_rows, 4);
        assert_eq!(report.seed, SeedOutcome::Disabled);
        assert_eq!(
            report.stats,
            DatabaseStats {
                tables: 3,
                app_info_rows: 4,
                todos_rows: 0,
            }
        );
        assert!(path.exists());
    }

    #[test]
    fn provision_with_seed() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("seeded.db");
        let options = ProvisionOptions {
            seed_todos: true,
            ..ProvisionOptions::default()
        };

        let report = provision_database(&path, options).expect("should provision");
        assert_eq!(report.seed, SeedOutcome::Seeded { inserted: 3 });
        assert_eq!(report.stats.todos_rows, 3);
    }

    #[test]
    fn provision_fails_on_non_database_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, vec![0x5a_u8; 4096]).expect("should write garbage");

        let result = provision_database(&path, ProvisionOptions::default());
        assert!(result.is_err(), "a non-database file must fail loudly");
    }
}
