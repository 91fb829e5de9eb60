//! Embedded schema for the todo database.
//!
//! Every object is created with an `IF NOT EXISTS` guard, so applying the
//! schema to an already-provisioned file is a no-op. There is no version
//! table: the schema is fixed and re-applied in full on every run.

use rusqlite::Connection;

use crate::error::DbError;

/// Name of the trigger that keeps `todos.updated_at` current.
pub const TODOS_UPDATED_AT_TRIGGER: &str = "trg_todos_updated_at";

/// Kind of object recorded in `sqlite_master`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A regular table.
    Table,
    /// A row-level trigger.
    Trigger,
}

impl ObjectKind {
    /// The `type` column value used by `sqlite_master`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Trigger => "trigger",
        }
    }
}

/// A single embedded schema object.
#[derive(Debug)]
pub struct SchemaObject {
    /// Object name as it appears in `sqlite_master`.
    pub name: &'static str,
    /// Table or trigger.
    pub kind: ObjectKind,
    sql: &'static str,
}

/// All schema objects in creation order. The trigger depends on `todos`
/// and must come after it.
pub const SCHEMA: &[SchemaObject] = &[
    SchemaObject {
        name: "app_info",
        kind: ObjectKind::Table,
        sql: include_str!("sql/app_info.sql"),
    },
    SchemaObject {
        name: "users",
        kind: ObjectKind::Table,
        sql: include_str!("sql/users.sql"),
    },
    SchemaObject {
        name: "todos",
        kind: ObjectKind::Table,
        sql: include_str!("sql/todos.sql"),
    },
    SchemaObject {
        name: TODOS_UPDATED_AT_TRIGGER,
        kind: ObjectKind::Trigger,
        sql: include_str!("sql/trg_todos_updated_at.sql"),
    },
];

/// Returns whether a schema object with the given kind and name exists.
///
/// # Errors
///
/// Returns the underlying SQLite error if `sqlite_master` cannot be read.
pub fn object_exists(
    conn: &Connection,
    kind: ObjectKind,
    name: &str,
) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2)",
        [kind.as_str(), name],
        |row| row.get(0),
    )
}

/// Creates every schema object that does not exist yet.
///
/// Returns the number of objects that were newly created; a second call on
/// the same database returns `0`.
///
/// # Errors
///
/// Returns `DbError::Schema` naming the object whose statement failed.
pub fn ensure_schema(conn: &Connection) -> Result<usize, DbError> {
    let mut created = 0;

    for object in SCHEMA {
        let schema_err = |source: rusqlite::Error| DbError::Schema {
            object: object.name,
            source,
        };

        let existed = object_exists(conn, object.kind, object.name).map_err(schema_err)?;
        conn.execute_batch(object.sql).map_err(schema_err)?;

        if existed {
            tracing::debug!(object = object.name, "schema object already present");
        } else {
            tracing::info!(
                object = object.name,
                kind = object.kind.as_str(),
                "created schema object"
            );
            created += 1;
        }
    }

    Ok(created)
}
