//! Scenario harness
//!
//! Executes an ordered list of named steps against a remote service. Steps
//! thread created resource ids to later steps through a shared [`Context`],
//! a failed gate step skips the rest of the main phase, and cleanup steps
//! always get a chance to revert side effects. The runner only produces a
//! [`RunReport`] value; rendering lives in [`report`].

mod context;
pub mod report;
mod runner;
mod step;

pub use context::Context;
pub use report::{RunReport, StepRecord, StepStatus};
pub use runner::{Phase, Runner};
pub use step::{Outcome, Step};
