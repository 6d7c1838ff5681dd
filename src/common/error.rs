//! Error types for the preflight checker
//!
//! Check failures are reported through `CheckOutcome`, not through these
//! errors. This type covers harness infrastructure problems: bad config,
//! unknown check ids, IO outside the check boundary.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the preflight checker
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Check Selection Errors ===
    #[error("Unknown check '{name}'. Use 'invcheck list' to see available checks")]
    UnknownCheck { name: String },

    // === Probe Errors ===
    #[error("Failed to spawn '{command}': {error}")]
    ProbeSpawn { command: String, error: String },

    #[error("Probe timed out after {0} seconds")]
    ProbeTimeout(u64),

    // === Database Errors ===
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a probe spawn error
    pub fn probe_spawn(command: &str, error: &str) -> Self {
        Self::ProbeSpawn {
            command: command.to_string(),
            error: error.to_string(),
        }
    }
}
