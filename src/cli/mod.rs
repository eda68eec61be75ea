//! CLI command handling
//!
//! Dispatches CLI commands: builds the transport and scenario, runs it, and
//! renders the report. The exit code comes from the report so the binary can
//! gate automation pipelines.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use tracing::info;

use crate::api::{ApiTransport, HttpTransport};
use crate::commands::Commands;
use crate::common::{Config, Result};
use crate::harness::report;
use crate::scenario;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Run {
            base_url,
            email,
            password,
            timeout,
            json,
        } => {
            let mut config = Config::load()?;
            config.apply_overrides(base_url, email, password, timeout);

            let transport = HttpTransport::new(
                &config.target.base_url,
                Duration::from_secs(config.timeouts.request_secs),
            )?;
            let api: Arc<dyn ApiTransport> = Arc::new(transport);
            let runner = scenario::build(api, config.credentials.clone());

            info!(
                base_url = %config.target.base_url,
                steps = runner.main_steps().len(),
                cleanup = runner.cleanup_steps().len(),
                "starting scenario run"
            );

            let run_report = runner.run().await;

            if json {
                println!("{}", report::render_json(&run_report)?);
            } else {
                report::render(&run_report);
            }

            Ok(if run_report.all_clear() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Steps => {
            let config = Config::load()?;
            let transport = HttpTransport::new(
                &config.target.base_url,
                Duration::from_secs(config.timeouts.request_secs),
            )?;
            let api: Arc<dyn ApiTransport> = Arc::new(transport);
            let runner = scenario::build(api, config.credentials.clone());

            println!("{}", "Main phase:".cyan());
            for step in runner.main_steps() {
                let marker = if step.is_gate() { " (gate)" } else { "" };
                println!("  {}{}", step.name(), marker.yellow());
            }

            println!("{}", "Cleanup phase:".cyan());
            for step in runner.cleanup_steps() {
                println!("  {}", step.name());
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}
