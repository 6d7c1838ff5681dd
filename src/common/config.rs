//! Configuration file handling
//!
//! The checker works without any configuration: every section defaults to
//! the layout of the inventory application as deployed. An `invcheck.toml`
//! in the project directory can override individual sections, e.g. to add
//! templates or point at a different Python interpreter.

use serde::Deserialize;
use std::path::Path;

use super::{Error, Result};

/// Name of the optional per-project configuration file
pub const CONFIG_FILE_NAME: &str = "invcheck.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// File-structure check settings
    #[serde(default)]
    pub files: FilesConfig,

    /// Environment check settings
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Database check settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Settings for the file-structure check
#[derive(Debug, Deserialize)]
pub struct FilesConfig {
    /// Paths (relative to the project directory) that must exist
    #[serde(default = "default_required_files")]
    pub required: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            required: default_required_files(),
        }
    }
}

// The application source keeps the upper-case names for app.PY and DATA.SQL;
// the list must match the deployed tree byte for byte.
fn default_required_files() -> Vec<String> {
    [
        "app.PY",
        "DATA.SQL",
        "requirements.txt",
        "static/style.css",
        "static/script.js",
        "templates/base.html",
        "templates/index.html",
        "templates/materials.html",
        "templates/add_material.html",
        "templates/edit_material.html",
        "templates/transaction.html",
        "templates/reports.html",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Settings for the environment check
#[derive(Debug, Deserialize)]
pub struct EnvironmentConfig {
    /// Python interpreter to probe (resolved via PATH when not absolute)
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Web framework package whose importability and version are checked
    #[serde(default = "default_framework")]
    pub framework: String,

    /// Standard-library modules the application imports
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,

    /// Timeout for a single interpreter probe in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            framework: default_framework(),
            modules: default_modules(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_framework() -> String {
    "flask".to_string()
}

fn default_modules() -> Vec<String> {
    ["sqlite3", "os", "datetime"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_probe_timeout() -> u64 {
    10
}

/// Settings for the database check
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Name of the transient database file, created inside the project
    /// directory and removed after the check
    #[serde(default = "default_database_file")]
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file: default_database_file(),
        }
    }
}

fn default_database_file() -> String {
    "inventory.db".to_string()
}

impl Config {
    /// Load configuration from `invcheck.toml` in the project directory
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}
