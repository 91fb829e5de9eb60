//! Error types for the provisioning database layer.

use thiserror::Error;

/// Errors that can occur while opening, provisioning, or inspecting the
/// todo database.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened or configured.
    #[error("failed to open database at '{path}': {source}")]
    Open {
        /// The path that was being opened.
        path: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Foreign-key enforcement could not be switched on.
    #[error("foreign key enforcement is not active (PRAGMA foreign_keys = {0})")]
    ForeignKeysDisabled(i64),

    /// The accessibility probe against an existing file failed.
    #[error("database probe failed: {0}")]
    Probe(#[source] rusqlite::Error),

    /// Creating a table or trigger failed.
    #[error("failed to create schema object '{object}': {source}")]
    Schema {
        /// Name of the table or trigger.
        object: &'static str,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Upserting an `app_info` row failed.
    #[error("failed to upsert app_info key '{key}': {source}")]
    Metadata {
        /// The metadata key being written.
        key: &'static str,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Reading `app_info` back failed.
    #[error("failed to read app_info metadata: {0}")]
    MetadataRead(#[source] rusqlite::Error),

    /// Seeding sample todos failed.
    #[error("failed to seed sample todos: {0}")]
    Seed(#[source] rusqlite::Error),

    /// A statistics query failed.
    #[error("failed to collect database statistics: {0}")]
    Stats(#[source] rusqlite::Error),

    /// Beginning or committing the provisioning transaction failed.
    #[error("provisioning transaction failed: {0}")]
    Transaction(#[source] rusqlite::Error),
}
