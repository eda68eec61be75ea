//! portal-probe - sequential integration checks for the teacher portal backend
//!
//! The crate is split into a reusable scenario harness (ordered steps, shared
//! context, gating and cleanup guarantees) and a concrete scenario that
//! exercises the portal's REST endpoints through a pluggable HTTP transport.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::{Context, Outcome, Phase, RunReport, Runner, Step};
