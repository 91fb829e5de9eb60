//! The provisioning run: every step from the existence check to the CLI
//! hint, in order.

use std::path::{Path, PathBuf};

use thiserror::Error;
use todo_db::{DbError, DbRuntimeSettings, ProvisionOptions, ProvisionReport};

use crate::artifacts::{self, ArtifactError};
use crate::cli_tool;
use crate::config::Config;

/// A step that failed without stopping the run.
#[derive(Debug, Error)]
pub enum SetupWarning {
    /// The existing database file could not be opened or read.
    #[error("database exists but may be corrupted: {0}")]
    Probe(DbError),

    /// The connection-info note could not be written.
    #[error("could not save connection info: {0}")]
    ConnectionInfo(ArtifactError),

    /// The viewer environment file could not be written.
    #[error("could not save environment variables: {0}")]
    EnvFile(ArtifactError),
}

/// Errors that abort the run.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The database path could not be made absolute.
    #[error("failed to resolve database path: {0}")]
    ResolvePath(#[source] ArtifactError),

    /// Opening, provisioning or committing the database failed.
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Everything a completed run learned, for the summary report.
#[derive(Debug)]
pub struct SetupOutcome {
    /// Database path as configured.
    pub db_path: PathBuf,
    /// Database path resolved against the working directory.
    pub db_abs: PathBuf,
    /// Whether the database file existed before this run.
    pub existed: bool,
    /// Database-side results.
    pub report: ProvisionReport,
    /// Whether the connection-info note was written.
    pub connection_info_written: bool,
    /// Whether the environment file was written.
    pub env_file_written: bool,
    /// Location of the command-line client, when found.
    pub cli_tool: Option<PathBuf>,
    /// Non-fatal failures, in the order they happened.
    pub warnings: Vec<SetupWarning>,
}

/// Reports whether the database at `db_abs` already exists and, if it does,
/// whether it can be opened and read. `db_path` is only used for logging.
///
/// A failed check is returned as a warning; provisioning still goes ahead.
pub fn check_existing(db_path: &Path, db_abs: &Path) -> (bool, Option<SetupWarning>) {
    if !db_abs.exists() {
        tracing::info!(path = %db_path.display(), "creating new SQLite database");
        return (false, None);
    }

    tracing::info!(path = %db_path.display(), "SQLite database already exists");
    match todo_db::probe_database(db_abs) {
        Ok(()) => {
            tracing::info!("database is accessible and working");
            (true, None)
        }
        Err(e) => {
            let warning = SetupWarning::Probe(e);
            tracing::warn!("{warning}");
            (true, Some(warning))
        }
    }
}

/// Runs the provisioner to completion.
///
/// The accessibility check and both artifact writes degrade to
/// [`SetupWarning`]s. Database failures abort the run.
///
/// # Errors
///
/// Returns `SetupError` if the database path cannot be resolved or any
/// database step fails.
pub fn run(config: &Config) -> Result<SetupOutcome, SetupError> {
    let db_path = config.database.path.clone();
    let db_abs = artifacts::resolve_absolute(&db_path).map_err(SetupError::ResolvePath)?;
    let mut warnings = Vec::new();

    let (existed, existing_warning) = check_existing(&db_path, &db_abs);
    warnings.extend(existing_warning);

    let options = ProvisionOptions {
        seed_todos: config.seed.todos,
        runtime: DbRuntimeSettings {
            busy_timeout_ms: config.database.busy_timeout_ms,
        },
    };
    let report = todo_db::provision_database(&db_abs, options)?;
    tracing::info!(
        created = report.created_objects,
        metadata = report.metadata_rows,
        "database provisioned"
    );

    let connection_info_written = match artifacts::write_connection_info(
        &config.artifacts.connection_info,
        &db_path,
        &db_abs,
    ) {
        Ok(()) => true,
        Err(e) => {
            let warning = SetupWarning::ConnectionInfo(e);
            tracing::warn!("{warning}");
            warnings.push(warning);
            false
        }
    };

    let env_file_written = match artifacts::write_env_file(
        &config.artifacts.env_file,
        &config.artifacts.env_var,
        &db_abs,
    ) {
        Ok(()) => true,
        Err(e) => {
            let warning = SetupWarning::EnvFile(e);
            tracing::warn!("{warning}");
            warnings.push(warning);
            false
        }
    };

    let cli_tool = cli_tool::find_executable_in_path(&config.artifacts.cli_tool);
    if let Some(path) = &cli_tool {
        tracing::debug!(path = %path.display(), "found SQLite CLI");
    }

    Ok(SetupOutcome {
        db_path,
        db_abs,
        existed,
        report,
        connection_info_written,
        env_file_written,
        cli_tool,
        warnings,
    })
}
