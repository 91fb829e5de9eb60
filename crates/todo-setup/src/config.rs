//! Provisioner configuration loading from file and environment variables.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Top-level provisioner configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database file settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Sample data settings.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Sidecar file settings.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, relative to the working directory
    /// unless absolute.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Busy timeout for the provisioning connection, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Sample data configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// Insert sample todos into an empty `todos` table.
    #[serde(default)]
    pub todos: bool,
}

/// Locations and names for the files written next to the database.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Connection-info note.
    #[serde(default = "default_connection_info")]
    pub connection_info: PathBuf,

    /// Shell environment file for the viewer. Its parent directory is
    /// created when missing.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Variable exported by the environment file.
    #[serde(default = "default_env_var")]
    pub env_var: String,

    /// Command-line client looked up on `PATH` for the closing hint.
    #[serde(default = "default_cli_tool")]
    pub cli_tool: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "todo_db=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("myapp.db")
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_connection_info() -> PathBuf {
    PathBuf::from("db_connection.txt")
}

fn default_env_file() -> PathBuf {
    PathBuf::from("db_visualizer").join("sqlite.env")
}

fn default_env_var() -> String {
    "SQLITE_DB".to_string()
}

fn default_cli_tool() -> String {
    "sqlite3".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            connection_info: default_connection_info(),
            env_file: default_env_file(),
            env_var: default_env_var(),
            cli_tool: default_cli_tool(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Interprets a boolean-like toggle: `1`, `true`, `yes` and `y` are truthy
/// (surrounding whitespace and case are ignored); anything else is false.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `SEED_TODOS` overrides `seed.todos` (see [`is_truthy`])
/// - `TODO_DB_PATH` overrides `database.path`
/// - `TODO_LOG_LEVEL` overrides `logging.level`
/// - `TODO_LOG_JSON` overrides `logging.json`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides through `env` instead of the
/// process environment.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config_with_env<F>(path: Option<&str>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Some(seed) = env("SEED_TODOS") {
        config.seed.todos = is_truthy(&seed);
    }
    if let Some(db_path) = env("TODO_DB_PATH").filter(|v| !v.trim().is_empty()) {
        config.database.path = PathBuf::from(db_path);
    }
    if let Some(level) = env("TODO_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("TODO_LOG_JSON") {
        config.logging.json = is_truthy(&json);
    }

    Ok(config)
}
