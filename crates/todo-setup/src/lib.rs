//! Provisioner for the todo application's local SQLite database.
//!
//! Loads configuration, drives the database layer in `todo-db`, writes the
//! connection-info note and the viewer environment file, and renders the
//! closing summary.

pub mod artifacts;
pub mod cli_tool;
pub mod config;
pub mod report;
pub mod setup;

pub use setup::{check_existing, run, SetupError, SetupOutcome, SetupWarning};
