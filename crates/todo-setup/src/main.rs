//! `todo-setup` binary: provisions the todo application's SQLite database.
//!
//! Loads configuration, installs structured logging, runs the provisioner
//! and prints a summary. Exits non-zero when a database step fails.

use std::process::ExitCode;

use todo_setup::config::{self, LoggingConfig};
use todo_setup::report::Summary;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("TODO_SETUP_CONFIG") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

fn main() -> ExitCode {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("todo-setup.toml"));

    let config = match config::load_config(selected_config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("todo-setup: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved configuration path"
    );
    tracing::info!("starting SQLite setup");

    match todo_setup::run(&config) {
        Ok(outcome) => {
            println!();
            print!("{}", Summary::new(&outcome, &config));
            tracing::info!(warnings = outcome.warnings.len(), "script completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "SQLite setup failed");
            ExitCode::FAILURE
        }
    }
}
