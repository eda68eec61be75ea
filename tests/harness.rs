//! Harness behaviour tests
//!
//! Verify the runner's ordering, gating, fault-boundary, and cleanup
//! guarantees using in-memory steps; no network is involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use portal_probe::harness::{Outcome, Phase, RunReport, Runner, Step, StepRecord, StepStatus};

/// A step that records how often it was invoked
fn counted(name: &str, calls: &Arc<AtomicUsize>) -> Step {
    let calls = calls.clone();
    Step::new(name, move |_ctx| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::passed())
        }
    })
}

fn failing(name: &str, reason: &str) -> Step {
    let reason = reason.to_string();
    Step::new(name, move |_ctx| {
        let reason = reason.clone();
        async move { Ok(Outcome::failed(reason)) }
    })
}

fn main_records(report: &RunReport) -> Vec<&StepRecord> {
    report
        .records
        .iter()
        .filter(|r| r.phase == Phase::Main)
        .collect()
}

#[tokio::test]
async fn counts_are_conserved_over_main_phase() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut runner = Runner::new();
    runner.step(counted("a", &calls));
    runner.step(failing("b", "nope").gate());
    runner.step(counted("c", &calls));
    runner.step(counted("d", &calls));
    let registered = runner.main_steps().len();

    let report = runner.run().await;

    let main = main_records(&report);
    let passed = main.iter().filter(|r| r.status.is_passed()).count();
    let failed = main.iter().filter(|r| r.status.is_failed()).count();
    let skipped = main.iter().filter(|r| r.status.is_skipped()).count();
    assert_eq!(passed + failed + skipped, registered);
}

#[tokio::test]
async fn gate_failure_skips_later_steps_without_invoking_them() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut runner = Runner::new();
    runner.step(failing("login", "HTTP 401: bad credentials").gate());
    runner.step(counted("profile", &calls));
    runner.step(counted("students", &calls));
    runner.step(counted("classes", &calls));

    let report = runner.run().await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.skipped(), 3);
    for record in &report.records[1..] {
        assert!(record.status.is_skipped(), "{} should be skipped", record.name);
    }
}

#[tokio::test]
async fn cleanup_runs_exactly_once_each_in_order_despite_gate_failure() {
    let order: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let mut runner = Runner::new();
    runner.step(failing("login", "HTTP 401").gate());
    runner.step(failing("never reached", "unused"));

    for name in ["remove task", "remove class"] {
        let order = order.clone();
        runner.cleanup(Step::new(name, move |_ctx| {
            let order = order.clone();
            let name = name.to_string();
            async move {
                order.lock().unwrap().push(name);
                Ok(Outcome::passed())
            }
        }));
    }

    let report = runner.run().await;

    assert_eq!(
        *order.lock().unwrap(),
        vec!["remove task".to_string(), "remove class".to_string()]
    );
    let cleanup: Vec<_> = report
        .records
        .iter()
        .filter(|r| r.phase == Phase::Cleanup)
        .collect();
    assert_eq!(cleanup.len(), 2);
    assert!(cleanup.iter().all(|r| r.status.is_passed()));
}

#[tokio::test]
async fn panicking_step_becomes_a_failure_with_the_message() {
    let mut runner = Runner::new();
    runner.step(Step::new("explode", |_ctx| async {
        if std::env::args().count() < usize::MAX {
            panic!("boom happened");
        }
        Ok(Outcome::passed())
    }));
    runner.step(counted("still runs", &Arc::new(AtomicUsize::new(0))));

    let report = runner.run().await;

    match &report.records[0].status {
        StepStatus::Failed { reason } => assert!(reason.contains("boom happened")),
        other => panic!("expected failure, got {other:?}"),
    }
    // the run survived the panic
    assert!(report.records[1].status.is_passed());
}

#[tokio::test]
async fn missing_context_key_fails_naming_the_key() {
    let mut runner = Runner::new();
    runner.step(Step::new("use resource", |ctx| async move {
        let _ = ctx.require_str("created class id")?;
        Ok(Outcome::passed())
    }));

    let report = runner.run().await;

    match &report.records[0].status {
        StepStatus::Failed { reason } => assert!(reason.contains("created class id")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn partial_failure_run_reports_correctly() {
    // A: gate, writes token; B: reads token; C: protocol failure;
    // D: depends on a key only C's success would have written; E: cleanup no-op.
    let deletes = Arc::new(AtomicUsize::new(0));
    let mut runner = Runner::new();

    runner.step(
        Step::new("login", |ctx| async move {
            ctx.put("token", "tok-1");
            Ok(Outcome::passed())
        })
        .gate(),
    );
    runner.step(Step::new("get profile", |ctx| async move {
        let _ = ctx.require_str("token")?;
        Ok(Outcome::passed())
    }));
    runner.step(Step::new("create resource", |_ctx| async {
        Ok(Outcome::failed("HTTP 500 from /resource: internal error"))
    }));
    runner.step(Step::new("use resource", |ctx| async move {
        let _ = ctx.require_str("resource_id")?;
        Ok(Outcome::passed())
    }));

    {
        let deletes = deletes.clone();
        runner.cleanup(Step::new("delete resource", move |ctx| {
            let deletes = deletes.clone();
            async move {
                if !ctx.contains("resource_id") {
                    return Ok(Outcome::passed_with("nothing to remove"));
                }
                deletes.fetch_add(1, Ordering::SeqCst);
                Ok(Outcome::passed())
            }
        }));
    }

    let report = runner.run().await;

    let statuses: Vec<bool> = report.records.iter().map(|r| r.status.is_passed()).collect();
    assert_eq!(statuses, vec![true, true, false, false, true]);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.skipped(), 0);
    assert!(!report.all_clear());
    assert_eq!(deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn gated_run_lists_single_failure_and_marks_rest_skipped() {
    let mut runner = Runner::new();
    runner.step(failing("login", "HTTP 401: bad credentials").gate());
    runner.step(failing("get profile", "unused"));
    runner.step(failing("create resource", "unused"));
    runner.step(failing("use resource", "unused"));
    runner.cleanup(Step::new("delete resource", |_ctx| async {
        Ok(Outcome::passed_with("nothing to remove"))
    }));

    let report = runner.run().await;

    let failures: Vec<&str> = report.failures().map(|r| r.name.as_str()).collect();
    assert_eq!(failures, vec!["login"]);
    assert_eq!(report.skipped(), 3);
    let cleanup_record = report.records.last().unwrap();
    assert_eq!(cleanup_record.phase, Phase::Cleanup);
    assert!(cleanup_record.status.is_passed());
    assert!(!report.all_clear());
}
