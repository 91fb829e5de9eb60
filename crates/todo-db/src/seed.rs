//! Optional sample data for the `todos` table.

use std::fmt;

use rusqlite::Connection;

use crate::error::DbError;

/// A sample todo inserted by the seeding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTodo {
    /// Todo title.
    pub title: &'static str,
    /// Free-form description.
    pub description: &'static str,
}

/// The rows inserted into an empty `todos` table when seeding is enabled.
/// All of them start with `completed = 0`.
pub const SAMPLE_TODOS: &[SampleTodo] = &[
    SampleTodo {
        title: "Buy groceries",
        description: "Milk, eggs, bread",
    },
    SampleTodo {
        title: "Finish project",
        description: "Complete the todo app backend",
    },
    SampleTodo {
        title: "Read a book",
        description: "Spend 30 minutes reading",
    },
];

/// What the seeding step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seeding was not requested.
    Disabled,
    /// Seeding was requested but `todos` already held rows.
    AlreadyPopulated {
        /// Number of rows found in `todos`.
        existing: i64,
    },
    /// The sample rows were inserted.
    Seeded {
        /// Number of rows inserted.
        inserted: usize,
    },
}

impl fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("todo seeding not enabled, skipping sample data"),
            Self::AlreadyPopulated { existing } => write!(
                f,
                "skipping todo seed data, table already has {existing} row(s)"
            ),
            Self::Seeded { inserted } => write!(f, "seeded {inserted} sample todo(s)"),
        }
    }
}

/// Inserts [`SAMPLE_TODOS`] when `enabled` is set and `todos` is empty.
///
/// Existing rows are never touched: a non-empty table yields
/// [`SeedOutcome::AlreadyPopulated`] and no insert.
///
/// # Errors
///
/// Returns `DbError::Seed` if counting or inserting fails.
pub fn seed_todos(conn: &Connection, enabled: bool) -> Result<SeedOutcome, DbError> {
    if !enabled {
        return Ok(SeedOutcome::Disabled);
    }

    let existing: i64 = conn
        .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))
        .map_err(DbError::Seed)?;
    if existing > 0 {
        return Ok(SeedOutcome::AlreadyPopulated { existing });
    }

    let mut stmt = conn
        .prepare("INSERT INTO todos (title, description, completed) VALUES (?1, ?2, 0)")
        .map_err(DbError::Seed)?;
    for todo in SAMPLE_TODOS {
        stmt.execute([todo.title, todo.description])
            .map_err(DbError::Seed)?;
    }

    Ok(SeedOutcome::Seeded {
        inserted: SAMPLE_TODOS.len(),
    })
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

    fn todo_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))
            .expect("should count todos")
    }

    #[test]
    fn disabled_inserts_nothing() {
        let conn = test_db();
        let outcome = seed_todos(&conn, false).expect("seed should succeed");
        assert_eq!(outcome, SeedOutcome::Disabled);
        assert_eq!(todo_count(&conn), 0);
    }

    #[test]
    fn enabled_on_empty_table_inserts_samples() {
        let conn = test_db();
        let outcome = seed_todos(&conn, true).expect("seed should succeed");
        assert_eq!(outcome, SeedOutcome::Seeded { inserted: 3 });

        let mut stmt = conn
            .prepare("SELECT title, description, completed FROM todos ORDER BY id")
            .expect("should prepare");
        let rows: Vec<(String, String, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .expect("should query")
            .map(|r| r.expect("should read row"))
            .collect();

        assert_eq!(rows.len(), 3);
        for (row, sample) in rows.iter().zip(SAMPLE_TODOS) {
            assert_eq!(row.0, sample.title);
            assert_eq!(row.1, sample.description);
            assert_eq!(row.2, 0, "sample todos start incomplete");
        }
    }

    #[test]
    fn enabled_on_populated_table_inserts_nothing() {
        let conn = test_db();
        conn.execute("INSERT INTO todos (title) VALUES ('mine')", [])
            .expect("should insert existing todo");

        let outcome = seed_todos(&conn, true).expect("seed should succeed");
        assert_eq!(outcome, SeedOutcome::AlreadyPopulated { existing: 1 });
        assert_eq!(todo_count(&conn), 1);
    }

    #[test]
    fn seeding_twice_only_inserts_once() {
        let conn = test_db();
        seed_todos(&conn, true).expect("first seed");
        let second = seed_todos(&conn, true).expect("second seed");
        assert_eq!(second, SeedOutcome::AlreadyPopulated { existing: 3 });
        assert_eq!(todo_count(&conn), 3);
    }
}
