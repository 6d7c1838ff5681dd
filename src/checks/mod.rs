//! Preflight checks and their structured results
//!
//! Each check is an independent unit returning a [`CheckOutcome`] rather
//! than printed text, so both the CLI renderer and the test suite consume
//! outcomes programmatically. Checks never abort each other: a failure is
//! recorded in the report and the remaining checks still run.

pub mod database;
pub mod environment;
pub mod files;

use std::path::Path;

use serde::Serialize;

use crate::common::{Config, Error, Result};

/// Final status of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
}

/// One verified sub-item within a check (a file, a module import, a
/// database step)
#[derive(Debug, Clone, Serialize)]
pub struct CheckItem {
    /// What was verified
    pub label: String,
    /// Whether the item passed
    pub ok: bool,
    /// Extra context: a version string, a row summary, or an error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckItem {
    pub fn pass(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok: true,
            detail: None,
        }
    }

    pub fn pass_with(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok: true,
            detail: Some(detail.into()),
        }
    }

    pub fn fail(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ok: false,
            detail: Some(detail.into()),
        }
    }
}

/// Result of running one check
#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    /// Stable identifier (`files`, `environment`, `database`)
    pub check: &'static str,
    /// Human-readable name for the report
    pub name: &'static str,
    pub status: CheckStatus,
    /// Per-item results in verification order
    pub items: Vec<CheckItem>,
    /// Top-level failure message when the check aborted mid-way
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckOutcome {
    /// Build an outcome from collected items: passed iff every item is ok
    fn from_items(info: &CheckInfo, items: Vec<CheckItem>) -> Self {
        let status = if items.iter().all(|i| i.ok) {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        };
        Self {
            check: info.id,
            name: info.name,
            status,
            items,
            error: None,
        }
    }

    /// Build a failed outcome from an error that aborted the check
    fn from_error(info: &CheckInfo, items: Vec<CheckItem>, error: &Error) -> Self {
        Self {
            check: info.id,
            name: info.name,
            status: CheckStatus::Failed,
            items,
            error: Some(error.to_string()),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}

/// Static description of a registered check
#[derive(Debug, Clone, Copy)]
pub struct CheckInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// All registered checks, in execution order
pub const ALL_CHECKS: [CheckInfo; 3] = [
    CheckInfo {
        id: files::ID,
        name: files::NAME,
        description: "Required project files and asset/template layout exist",
    },
    CheckInfo {
        id: environment::ID,
        name: environment::NAME,
        description: "Python interpreter, web framework, and stdlib modules import",
    },
    CheckInfo {
        id: database::ID,
        name: database::NAME,
        description: "SQLite create/insert/select round-trip with cleanup",
    },
];

/// Aggregate result of a harness run
#[derive(Debug, Serialize)]
pub struct Report {
    pub outcomes: Vec<CheckOutcome>,
    pub passed: usize,
    pub total: usize,
}

impl Report {
    fn new(outcomes: Vec<CheckOutcome>) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        Self {
            outcomes,
            passed,
            total,
        }
    }

    /// Whether the run should exit with status 0
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Run every registered check in fixed order
pub async fn run_all(config: &Config, project_dir: &Path) -> Report {
    let mut outcomes = Vec::with_capacity(ALL_CHECKS.len());
    for info in &ALL_CHECKS {
        outcomes.push(run_one(info, config, project_dir).await);
    }
    Report::new(outcomes)
}

/// Run a subset of checks by id, preserving registration order
pub async fn run_selected(config: &Config, project_dir: &Path, ids: &[String]) -> Result<Report> {
    for id in ids {
        if !ALL_CHECKS.iter().any(|info| info.id == id) {
            return Err(Error::UnknownCheck { name: id.clone() });
        }
    }

    let mut outcomes = Vec::new();
    for info in &ALL_CHECKS {
        if ids.iter().any(|id| id == info.id) {
            outcomes.push(run_one(info, config, project_dir).await);
        }
    }
    Ok(Report::new(outcomes))
}

async fn run_one(info: &CheckInfo, config: &Config, project_dir: &Path) -> CheckOutcome {
    tracing::debug!(check = info.id, "running check");
    match info.id {
        files::ID => files::run(info, &config.files, project_dir),
        environment::ID => environment::run(info, &config.environment).await,
        database::ID => database::run(info, &config.database, project_dir),
        other => CheckOutcome {
            check: info.id,
            name: info.name,
            status: CheckStatus::Failed,
            items: Vec::new(),
            error: Some(format!("no runner registered for check '{other}'")),
        },
    }
}
