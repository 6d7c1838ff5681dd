//! Environment check
//!
//! Verifies the Python side of the deployment the same way the application
//! will use it: the interpreter is spawned once per probe with `-c`, and
//! the exit status is the verdict. The framework probe also prints the
//! package version so the report can show what is actually installed.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tokio::time::{timeout, Duration};

use crate::common::config::EnvironmentConfig;
use crate::common::{Error, Result};

use super::{CheckInfo, CheckItem, CheckOutcome};

pub const ID: &str = "environment";
pub const NAME: &str = "Environment";

/// Run the environment check
pub async fn run(info: &CheckInfo, config: &EnvironmentConfig) -> CheckOutcome {
    let mut items = Vec::new();

    let interpreter = match resolve_interpreter(&config.interpreter) {
        Some(path) => {
            items.push(CheckItem::pass_with(
                config.interpreter.as_str(),
                path.display().to_string(),
            ));
            path
        }
        None => {
            items.push(CheckItem::fail(
                config.interpreter.as_str(),
                "not found on PATH",
            ));
            // No interpreter means no probe can run; report the remaining
            // probes as skipped failures so the report stays complete
            items.push(CheckItem::fail(config.framework.as_str(), "not probed"));
            for module in &config.modules {
                items.push(CheckItem::fail(module.as_str(), "not probed"));
            }
            return CheckOutcome::from_items(info, items);
        }
    };

    // Framework probe reports the installed version alongside importability
    let script = format!(
        "import {pkg}; print(getattr({pkg}, '__version__', 'unknown'))",
        pkg = config.framework
    );
    items.push(
        probe_item(
            &interpreter,
            &script,
            config.framework.as_str(),
            config.probe_timeout_secs,
            true,
        )
        .await,
    );

    for module in &config.modules {
        let script = format!("import {module}");
        items.push(
            probe_item(
                &interpreter,
                &script,
                module.as_str(),
                config.probe_timeout_secs,
                false,
            )
            .await,
        );
    }

    CheckOutcome::from_items(info, items)
}

/// Resolve the configured interpreter to an executable path
///
/// Explicit paths are taken as-is; bare names go through PATH lookup.
fn resolve_interpreter(name: &str) -> Option<PathBuf> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 {
        return as_path.exists().then(|| as_path.to_path_buf());
    }
    which::which(name).ok()
}

/// Run one `-c` probe and fold the result into a check item
async fn probe_item(
    interpreter: &Path,
    script: &str,
    label: &str,
    timeout_secs: u64,
    capture_version: bool,
) -> CheckItem {
    match probe(interpreter, script, timeout_secs).await {
        Ok(output) if output.success => {
            if capture_version {
                let version = output.stdout.lines().next().unwrap_or("").trim();
                if version.is_empty() {
                    CheckItem::pass(label)
                } else {
                    CheckItem::pass_with(label, version)
                }
            } else {
                CheckItem::pass(label)
            }
        }
        Ok(output) => CheckItem::fail(label, failure_detail(&output.stderr)),
        Err(e) => CheckItem::fail(label, e.to_string()),
    }
}

struct ProbeOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

/// Spawn the interpreter with `-c <script>` and collect its output
async fn probe(interpreter: &Path, script: &str, timeout_secs: u64) -> Result<ProbeOutput> {
    let command = format!("{} -c '{}'", interpreter.display(), script);
    tracing::debug!(%command, "spawning probe");

    let mut cmd = Command::new(interpreter);
    cmd.arg("-c")
        .arg(script)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = timeout(Duration::from_secs(timeout_secs), cmd.output())
        .await
        .map_err(|_| Error::ProbeTimeout(timeout_secs))?
        .map_err(|e| Error::probe_spawn(&command, &e.to_string()))?;

    Ok(ProbeOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Condense interpreter stderr to the line that names the problem
///
/// Python tracebacks end with the exception line (e.g.
/// `ModuleNotFoundError: No module named 'flask'`), which is the part
/// worth surfacing.
fn failure_detail(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("probe exited with non-zero status")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;

    fn test_info() -> CheckInfo {
        CheckInfo {
            id: ID,
            name: NAME,
            description: "",
        }
    }

    fn config_with(interpreter: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            interpreter: interpreter.to_string(),
            framework: "flask".to_string(),
            modules: vec!["sqlite3".to_string(), "os".to_string()],
            probe_timeout_secs: 5,
        }
    }

    #[test]
    fn test_failure_detail_picks_exception_line() {
        let stderr = "Traceback (most recent call last):\n  File \"<string>\", line 1, in <module>\nModuleNotFoundError: No module named 'flask'\n";
        assert_eq!(
            failure_detail(stderr),
            "ModuleNotFoundError: No module named 'flask'"
        );
    }

    #[test]
    fn test_failure_detail_empty_stderr() {
        assert_eq!(failure_detail(""), "probe exited with non-zero status");
    }

    #[tokio::test]
    async fn test_missing_interpreter_fails_every_item() {
        let config = config_with("definitely-not-a-python-interpreter");
        let outcome = run(&test_info(), &config).await;
        assert_eq!(outcome.status, CheckStatus::Failed);
        // interpreter + framework + two modules, all reported
        assert_eq!(outcome.items.len(), 4);
        assert!(outcome.items.iter().all(|i| !i.ok));
        assert_eq!(outcome.items[0].detail.as_deref(), Some("not found on PATH"));
    }

    #[cfg(unix)]
    fn write_stub(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("python-stub");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stub_interpreter_passes_with_version() {
        let dir = tempfile::tempdir().unwrap();
        // Prints a version for the framework probe, succeeds on plain imports
        let stub = write_stub(dir.path(), r#"case "$2" in *print*) echo 3.0.2;; esac"#);

        let config = config_with(stub.to_str().unwrap());
        let outcome = run(&test_info(), &config).await;
        assert_eq!(outcome.status, CheckStatus::Passed);
        let flask = outcome.items.iter().find(|i| i.label == "flask").unwrap();
        assert_eq!(flask.detail.as_deref(), Some("3.0.2"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stub_interpreter_import_error() {
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub(
            dir.path(),
            r#"echo "ModuleNotFoundError: No module named 'flask'" >&2; exit 1"#,
        );

        let config = config_with(stub.to_str().unwrap());
        let outcome = run(&test_info(), &config).await;
        assert_eq!(outcome.status, CheckStatus::Failed);
        let flask = outcome.items.iter().find(|i| i.label == "flask").unwrap();
        assert!(!flask.ok);
        assert_eq!(
            flask.detail.as_deref(),
            Some("ModuleNotFoundError: No module named 'flask'")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_timeout_is_a_failed_item() {
        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub(dir.path(), "sleep 30");

        let mut config = config_with(stub.to_str().unwrap());
        config.probe_timeout_secs = 1;
        config.modules.clear();

        let outcome = run(&test_info(), &config).await;
        assert_eq!(outcome.status, CheckStatus::Failed);
        let flask = outcome.items.iter().find(|i| i.label == "flask").unwrap();
        assert!(flask
            .detail
            .as_deref()
            .unwrap_or("")
            .contains("timed out"));
    }
}
