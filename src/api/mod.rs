//! HTTP transport seam
//!
//! Step actions talk to the backend through the [`ApiTransport`] trait, so
//! the scenario can run against the real portal (`HttpTransport`) or a
//! scripted in-memory fake in tests.

mod http;
mod transport;

pub use http::HttpTransport;
pub use transport::{ApiResponse, ApiTransport, BODY_EXCERPT_CHARS};
