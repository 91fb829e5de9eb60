//! Sidecar text files written next to the database: the connection-info
//! note and the viewer's environment file.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while writing an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The current working directory could not be determined.
    #[error("failed to resolve working directory: {0}")]
    WorkingDir(io::Error),

    /// The artifact's parent directory could not be created.
    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The artifact could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Resolves `path` against the current working directory and removes `.`
/// and `..` components.
///
/// Resolution is lexical: the database may not exist yet, so nothing is
/// looked up on disk and symlinks are kept as the user wrote them. `..` at
/// the root stays at the root.
///
/// # Errors
///
/// Returns `ArtifactError::WorkingDir` if `path` is relative and the working
/// directory cannot be read.
pub fn resolve_absolute(path: &Path) -> Result<PathBuf, ArtifactError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(ArtifactError::WorkingDir)?
            .join(path)
    };
    Ok(normalize_lexically(&joined))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Connection string in the `sqlite:///<absolute path>` form.
pub fn connection_string(db_abs: &Path) -> String {
    format!("sqlite:///{}", db_abs.display())
}

/// Renders the connection-info note.
///
/// `db_name` is the path as configured and is used in the short snippets;
/// `db_abs` is the resolved absolute path.
pub fn render_connection_info(db_name: &Path, db_abs: &Path) -> String {
    let name = db_name.display();
    format!(
        "# SQLite connection methods:\n\
         # Rust: rusqlite::Connection::open(\"{name}\")\n\
         # Connection string: {conn}\n\
         # File path: {abs}\n\
         # Usage notes:\n\
         # - Always enable foreign keys after connecting: PRAGMA foreign_keys = ON;\n\
         # - updated_at on todos is maintained by trigger '{trigger}'\n\
         # - Example CLI query: sqlite3 {name} \"SELECT * FROM todos;\"\n",
        conn = connection_string(db_abs),
        abs = db_abs.display(),
        trigger = todo_db::TODOS_UPDATED_AT_TRIGGER,
    )
}

/// Renders the environment file: a single `export VAR="<absolute path>"`
/// line.
pub fn render_env_file(env_var: &str, db_abs: &Path) -> String {
    format!("export {env_var}=\"{}\"\n", db_abs.display())
}

fn write_file(target: &Path, contents: &str) -> Result<(), ArtifactError> {
    std::fs::write(target, contents).map_err(|source| ArtifactError::Write {
        path: target.to_path_buf(),
        source,
    })
}

/// Writes the connection-info note to `target`, replacing any previous file.
///
/// # Errors
///
/// Returns `ArtifactError::Write` if the file cannot be written.
pub fn write_connection_info(
    target: &Path,
    db_name: &Path,
    db_abs: &Path,
) -> Result<(), ArtifactError> {
    write_file(target, &render_connection_info(db_name, db_abs))?;
    tracing::info!(path = %target.display(), "connection information saved");
    Ok(())
}

/// Writes the environment file to `target`, creating its parent directory
/// when missing.
///
/// # Errors
///
/// Returns `ArtifactError::CreateDir` or `ArtifactError::Write`.
pub fn write_env_file(target: &Path, env_var: &str, db_abs: &Path) -> Result<(), ArtifactError> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| ArtifactError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %parent.display(), "created directory");
        }
    }

    write_file(target, &render_env_file(env_var, db_abs))?;
    tracing::info!(path = %target.display(), "environment variables saved");
    Ok(())
}

/// Extracts the absolute database path from a rendered environment file.
pub fn parse_env_file(contents: &str, env_var: &str) -> Option<PathBuf> {
    let prefix = format!("export {env_var}=");
    contents.lines().find_map(|line| {
        let value = line.trim().strip_prefix(&prefix)?;
        let value = value.strip_prefix('"').and_then(|v| v.strip_suffix('"'))?;
        Some(PathBuf::from(value))
    })
}
