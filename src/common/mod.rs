//! Common utilities shared across the CLI, harness, and scenario

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::{Config, Credentials};
pub use error::{Error, Result};
