//! Human-readable summary printed after a successful run. Not meant for
//! machine parsing.

use std::fmt;

use crate::artifacts::connection_string;
use crate::config::Config;
use crate::setup::SetupOutcome;

/// Closing summary for a completed run, rendered through `Display`.
pub struct Summary<'a> {
    outcome: &'a SetupOutcome,
    config: &'a Config,
}

impl<'a> Summary<'a> {
    /// Wraps a run outcome and the configuration it ran with.
    pub fn new(outcome: &'a SetupOutcome, config: &'a Config) -> Self {
        Self { outcome, config }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.outcome;
        let artifacts = &self.config.artifacts;
        let name = outcome.db_path.display();
        let abs = outcome.db_abs.display();
        let stats = &outcome.report.stats;

        writeln!(f, "SQLite setup complete!")?;
        if outcome.existed {
            writeln!(f, "Database: {name} (already existed)")?;
        } else {
            writeln!(f, "Database: {name}")?;
        }
        writeln!(f, "Location: {abs}")?;
        writeln!(f, "Seed: {}", outcome.report.seed)?;
        if outcome.connection_info_written {
            writeln!(f, "Connection info: {}", artifacts.connection_info.display())?;
        }

        if outcome.env_file_written {
            writeln!(f)?;
            writeln!(
                f,
                "To use with the viewer, run: source {}",
                artifacts.env_file.display()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "To connect to the database, use one of the following methods:")?;
        writeln!(
            f,
            "1. Rust: rusqlite::Connection::open(\"{name}\")  # remember PRAGMA foreign_keys = ON"
        )?;
        writeln!(
            f,
            "2. Connection string: {}",
            connection_string(&outcome.db_abs)
        )?;
        writeln!(f, "3. Direct file access: {abs}")?;

        writeln!(f)?;
        writeln!(f, "Database statistics:")?;
        writeln!(f, "  Tables: {}", stats.tables)?;
        writeln!(f, "  App info records: {}", stats.app_info_rows)?;
        writeln!(f, "  Todos records: {}", stats.todos_rows)?;

        if outcome.cli_tool.is_some() {
            writeln!(f)?;
            writeln!(f, "SQLite CLI is available. You can also use:")?;
            writeln!(f, "  {} {name}", artifacts.cli_tool)?;
        }

        if !outcome.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Completed with {} warning(s):", outcome.warnings.len())?;
            for warning in &outcome.warnings {
                writeln!(f, "  - {warning}")?;
            }
        }

        Ok(())
    }
}
