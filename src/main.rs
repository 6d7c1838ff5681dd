//! invcheck - preflight checker for the inventory management web application
//!
//! Runs the file-structure, environment, and database checks against a
//! project directory and exits non-zero if any of them fail.

use clap::Parser;
use invcheck::{cli, commands::Commands, common::logging};

#[derive(Parser)]
#[command(name = "invcheck", about = "Preflight checker for the inventory web app")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match cli::dispatch(command).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
