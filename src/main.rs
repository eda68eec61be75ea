//! portal-probe - sequential integration checks for the teacher portal backend
//!
//! Runs an ordered scenario of HTTP checks against the portal API and exits
//! non-zero when any step failed, so it can gate automation pipelines.

use std::process::ExitCode;

use clap::Parser;
use portal_probe::{cli, commands::Commands, common};

#[derive(Parser)]
#[command(name = "portal-probe", about = "Sequential integration checks for the teacher portal backend")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    common::logging::init_cli();

    let cli = Cli::parse();

    match cli::dispatch(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
