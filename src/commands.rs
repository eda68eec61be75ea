//! CLI command definitions
//!
//! Defines the clap commands for portal-probe.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Execute the teacher portal scenario against the configured backend
    Run {
        /// Base URL of the backend API (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,

        /// Login email for the teacher account (overrides the config file)
        #[arg(long)]
        email: Option<String>,

        /// Login password for the teacher account (overrides the config file)
        #[arg(long)]
        password: Option<String>,

        /// Per-request timeout in seconds (overrides the config file)
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the run report as JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },

    /// List the registered scenario steps without executing anything
    Steps,
}
