//! CLI command definitions
//!
//! Defines the clap commands for the preflight checker.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run preflight checks (default when no subcommand is given)
    Run {
        /// Project directory to check
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Run only the named check(s): files, environment, database
        /// Can be specified multiple times: --only files --only database
        #[arg(long = "only", short = 'o')]
        only: Vec<String>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available checks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        // Bare `invcheck` runs the full suite against the current directory
        Self::Run {
            dir: PathBuf::from("."),
            only: Vec::new(),
            json: false,
        }
    }
}
