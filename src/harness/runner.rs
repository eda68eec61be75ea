//! Scenario runner
//!
//! Owns the context, executes steps in registration order, and enforces the
//! gating and cleanup rules. Any fault escaping an action - an error return
//! or a panic - is caught at the invocation boundary and recorded as a step
//! failure; the run itself always proceeds to completion and cleanup.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serde::Serialize;
use tracing::{debug, warn};

use super::context::Context;
use super::report::{RunReport, StepRecord, StepStatus};
use super::step::{Outcome, Step};

/// Execution phase a step is registered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Main,
    Cleanup,
}

/// Sequential scenario runner
#[derive(Default)]
pub struct Runner {
    context: Context,
    main: Vec<Step>,
    cleanup: Vec<Step>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step; order of registration within a phase is execution order
    pub fn register(&mut self, step: Step, phase: Phase) {
        match phase {
            Phase::Main => self.main.push(step),
            Phase::Cleanup => self.cleanup.push(step),
        }
    }

    /// Register a main-phase step
    pub fn step(&mut self, step: Step) {
        self.register(step, Phase::Main);
    }

    /// Register a cleanup-phase step
    pub fn cleanup(&mut self, step: Step) {
        self.register(step, Phase::Cleanup);
    }

    pub fn main_steps(&self) -> &[Step] {
        &self.main
    }

    pub fn cleanup_steps(&self) -> &[Step] {
        &self.cleanup
    }

    /// Handle to the run context, e.g. for seeding values before a run
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Execute all registered steps and produce the run report.
    ///
    /// Main-phase steps run in order until a gate step fails, after which the
    /// remaining main-phase steps are recorded as skipped without being
    /// invoked. Cleanup steps then run unconditionally, each one guarded
    /// independently.
    pub async fn run(self) -> RunReport {
        let mut records = Vec::with_capacity(self.main.len() + self.cleanup.len());
        let mut gated = false;

        for step in &self.main {
            if gated {
                debug!(step = step.name(), "skipped (gate failed earlier)");
                records.push(StepRecord {
                    name: step.name().to_string(),
                    phase: Phase::Main,
                    status: StepStatus::Skipped,
                });
                continue;
            }

            let status = execute(step, self.context.clone()).await;
            if step.is_gate() && status.is_failed() {
                warn!(step = step.name(), "gate step failed, skipping the rest of the main phase");
                gated = true;
            }
            records.push(StepRecord {
                name: step.name().to_string(),
                phase: Phase::Main,
                status,
            });
        }

        for step in &self.cleanup {
            let status = execute(step, self.context.clone()).await;
            records.push(StepRecord {
                name: step.name().to_string(),
                phase: Phase::Cleanup,
                status,
            });
        }

        RunReport { records }
    }
}

/// Invoke one step with the fault boundary in place
async fn execute(step: &Step, ctx: Context) -> StepStatus {
    debug!(step = step.name(), "executing");

    let result = AssertUnwindSafe(step.invoke(ctx)).catch_unwind().await;

    match result {
        Ok(Ok(Outcome::Success { detail })) => StepStatus::Passed { detail },
        Ok(Ok(Outcome::Failure { reason })) => StepStatus::Failed { reason },
        Ok(Err(e)) => StepStatus::Failed {
            reason: e.to_string(),
        },
        Err(payload) => StepStatus::Failed {
            reason: format!("step panicked: {}", panic_message(payload.as_ref())),
        },
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing(name: &str) -> Step {
        Step::new(name, |_ctx| async { Ok(Outcome::passed()) })
    }

    fn failing(name: &str, reason: &str) -> Step {
        let reason = reason.to_string();
        Step::new(name, move |_ctx| {
            let reason = reason.clone();
            async move { Ok(Outcome::failed(reason)) }
        })
    }

    #[tokio::test]
    async fn test_steps_run_in_registration_order() {
        let mut runner = Runner::new();
        runner.step(Step::new("first", |ctx| async move {
            ctx.put("order", "first");
            Ok(Outcome::passed())
        }));
        runner.step(Step::new("second", |ctx| async move {
            let seen = ctx.require_str("order")?;
            ctx.put("order", format!("{seen},second"));
            Ok(Outcome::passed())
        }));

        let context = runner.context().clone();
        let report = runner.run().await;
        assert_eq!(report.failed(), 0);
        assert_eq!(context.get_str("order").as_deref(), Some("first,second"));
    }

    #[tokio::test]
    async fn test_error_return_becomes_failure() {
        let mut runner = Runner::new();
        runner.step(Step::new("reads missing key", |ctx| async move {
            let _ = ctx.require_str("never written")?;
            Ok(Outcome::passed())
        }));

        let report = runner.run().await;
        assert_eq!(report.failed(), 1);
        match &report.records[0].status {
            StepStatus::Failed { reason } => assert!(reason.contains("never written")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cleanup_failure_does_not_gate_cleanup() {
        let mut runner = Runner::new();
        runner.cleanup(failing("broken teardown", "oops"));
        runner.cleanup(passing("later teardown"));

        let report = runner.run().await;
        assert_eq!(report.failed(), 1);
        assert_eq!(report.passed(), 1);
        assert!(matches!(
            report.records[1].status,
            StepStatus::Passed { .. }
        ));
    }

    #[tokio::test]
    async fn test_non_gate_failure_does_not_skip() {
        let mut runner = Runner::new();
        runner.step(failing("flaky endpoint", "HTTP 500"));
        runner.step(passing("unaffected endpoint"));

        let report = runner.run().await;
        assert_eq!(report.failed(), 1);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.skipped(), 0);
    }
}
