//! invcheck - preflight checker for the inventory management web application
//!
//! Verifies that a deployment is runnable: the project file tree is
//! complete, the Python environment imports the web framework, and a
//! SQLite round-trip succeeds. Checks return structured outcomes so
//! scripts and tests can consume results programmatically.

pub mod checks;
pub mod cli;
pub mod commands;
pub mod common;

// Re-export commonly used types for tests
pub use checks::{CheckItem, CheckOutcome, CheckStatus, Report};
pub use common::{Config, Error, Result};
