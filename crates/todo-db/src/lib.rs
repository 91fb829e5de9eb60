//! Database layer for the todo application provisioner.
//!
//! Opens the SQLite file with foreign-key enforcement, applies the fixed
//! schema (`app_info`, `users`, `todos` and the `updated_at` trigger),
//! upserts the application metadata, optionally seeds sample todos and
//! reports row counts.
//!
//! # Design decisions
//!
//! - **Guarded DDL instead of migrations**: the schema is small and fixed.
//!   Each object is created with `IF NOT EXISTS` from an embedded `.sql`
//!   file, so re-running provisioning never changes an existing schema.
//! - **One transaction per run**: schema, metadata and seed data commit
//!   together.
//! - **Trigger-maintained timestamps**: `todos.updated_at` is rewritten by
//!   `trg_todos_updated_at`, so every writer gets it regardless of the
//!   client code.

mod connection;
mod error;
mod metadata;
mod provision;
mod schema;
mod seed;
mod stats;

pub use connection::{open_connection, probe_database, DbRuntimeSettings};
pub use error::DbError;
pub use metadata::{read_metadata, upsert_metadata, APP_METADATA};
pub use provision::{provision_database, ProvisionOptions, ProvisionReport};
pub use schema::{
    ensure_schema, object_exists, ObjectKind, SchemaObject, SCHEMA, TODOS_UPDATED_AT_TRIGGER,
};
pub use seed::{seed_todos, SampleTodo, SeedOutcome, SAMPLE_TODOS};
pub use stats::{collect_stats, DatabaseStats};
