//! Error types for portal-probe
//!
//! Step actions report failures through these variants; the harness converts
//! any error escaping an action into a recorded step failure, so nothing here
//! aborts a run on its own.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for portal-probe
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    // === Protocol Errors ===
    #[error("HTTP {status} from {path}: {body}")]
    Protocol {
        path: String,
        status: u16,
        body: String,
    },

    #[error("unexpected payload from {path}: {detail}")]
    Payload { path: String, detail: String },

    // === Step Dependency Errors ===
    #[error("missing dependency '{0}': the producing step failed or was skipped")]
    DependencyMissing(String),

    // === Configuration Errors ===
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a payload error for a response that could not be interpreted
    pub fn payload(path: &str, detail: impl Into<String>) -> Self {
        Self::Payload {
            path: path.to_string(),
            detail: detail.into(),
        }
    }
}
