//! CLI command handling
//!
//! Dispatches CLI commands and renders check reports for the terminal.

use std::path::Path;

use colored::Colorize;

use crate::checks::{self, CheckOutcome, Report, ALL_CHECKS};
use crate::commands::Commands;
use crate::common::{Config, Result};

const BANNER: &str = "INVENTORY MANAGEMENT SYSTEM - PREFLIGHT";
const RULE_WIDTH: usize = 50;

/// Dispatch a CLI command
///
/// Returns whether the process should exit with status 0.
pub async fn dispatch(command: Commands) -> Result<bool> {
    match command {
        Commands::Run { dir, only, json } => {
            let config = Config::load(&dir)?;
            tracing::info!(dir = %dir.display(), "running preflight checks");

            let report = if only.is_empty() {
                checks::run_all(&config, &dir).await
            } else {
                checks::run_selected(&config, &dir, &only).await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, &dir);
            }

            Ok(report.all_passed())
        }

        Commands::List { json } => {
            if json {
                let entries: Vec<_> = ALL_CHECKS
                    .iter()
                    .map(|info| {
                        serde_json::json!({
                            "id": info.id,
                            "name": info.name,
                            "description": info.description,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("Available checks:");
                for info in &ALL_CHECKS {
                    println!("  {:12} - {}", info.id, info.description);
                }
            }
            Ok(true)
        }
    }
}

/// Render the full report as human-readable text
fn print_report(report: &Report, project_dir: &Path) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", BANNER.white().bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Project directory: {}", project_dir.display().to_string().dimmed());

    for outcome in &report.outcomes {
        print_outcome(outcome);
    }

    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    let tally = format!("RESULT: {}/{} checks passed", report.passed, report.total);
    if report.all_passed() {
        println!("{}", tally.green().bold());
        print_next_steps();
    } else {
        println!("{}", tally.red().bold());
        println!("Some checks failed. See the steps above.");
    }
}

/// Render one check outcome with its per-item lines
fn print_outcome(outcome: &CheckOutcome) {
    println!();
    println!("{}:", outcome.name.blue().bold());
    println!("{}", "-".repeat(30));

    for item in &outcome.items {
        let mark = if item.ok { "✓".green() } else { "✗".red() };
        match &item.detail {
            Some(detail) => println!("  {} {} - {}", mark, item.label, detail.dimmed()),
            None => println!("  {} {}", mark, item.label),
        }
    }

    if let Some(error) = &outcome.error {
        println!("  {} {}", "✗".red(), error);
    }

    if !outcome.passed() {
        println!("  {} {}", "✗".red(), format!("{} FAILED", outcome.name).red());
    }
}

/// Post-success usage hints, mirroring what a fresh deployment needs next
fn print_next_steps() {
    println!();
    println!("To start the application:");
    println!("  1. Install dependencies: pip install -r requirements.txt");
    println!("  2. Run the application:  python app.PY");
    println!("  3. Open browser:         http://localhost:5000");
}
