//! The teacher portal scenario
//!
//! One step list covering every endpoint the portal exposes to teachers:
//! authentication (the gate), profile, students, curricular paths, classes,
//! attendance, calendar events, gamification, catalog, and notifications,
//! followed by cleanup steps that remove the records the run created.
//!
//! The backend speaks Spanish route and field names; steps keep those on the
//! wire and use English for step names and context keys.

mod attendance;
mod auth;
mod calendar;
mod catalog;
mod classes;
mod cleanup;
mod curricula;
mod gamification;
mod notifications;
mod profile;
mod students;

use std::sync::Arc;

use serde_json::Value;

use crate::api::{ApiResponse, ApiTransport};
use crate::common::{Credentials, Error, Result};
use crate::harness::{Context, Runner};

/// Shared handle to the transport, cloned into each step's action
pub type Api = Arc<dyn ApiTransport>;

/// Context keys written and read by the scenario steps
pub mod keys {
    /// Bearer token from the login step; read by every later step
    pub const TOKEN: &str = "session_token";
    pub const USER_ID: &str = "user_id";
    /// For teacher accounts the backend uses the user id as the teacher id
    pub const TEACHER_ID: &str = "teacher_id";
    pub const STUDENT_ID: &str = "student_id";
    pub const PATH_ID: &str = "curricular_path_id";
    pub const CLASS_ID: &str = "class_id";
    pub const ATTENDANCE_ID: &str = "attendance_id";
    pub const TASK_ID: &str = "task_id";
    pub const REMINDER_ID: &str = "reminder_id";
    pub const NOTE_ID: &str = "note_id";
    pub const PRODUCT_ID: &str = "product_id";
    pub const NOTIFICATION_ID: &str = "notification_id";
}

/// Build the full scenario runner against the given transport
pub fn build(api: Api, credentials: Credentials) -> Runner {
    let mut runner = Runner::new();

    runner.step(auth::login(api.clone(), credentials));
    for step in profile::steps(&api) {
        runner.step(step);
    }
    for step in students::steps(&api) {
        runner.step(step);
    }
    for step in curricula::steps(&api) {
        runner.step(step);
    }
    for step in classes::steps(&api) {
        runner.step(step);
    }
    for step in attendance::steps(&api) {
        runner.step(step);
    }
    for step in calendar::steps(&api) {
        runner.step(step);
    }
    for step in gamification::steps(&api) {
        runner.step(step);
    }
    for step in catalog::steps(&api) {
        runner.step(step);
    }
    for step in notifications::steps(&api) {
        runner.step(step);
    }
    for step in cleanup::steps(&api) {
        runner.cleanup(step);
    }

    runner
}

/// Protocol failure for a status the step did not expect
pub(crate) fn unexpected(path: &str, resp: &ApiResponse) -> Error {
    Error::Protocol {
        path: path.to_string(),
        status: resp.status,
        body: resp.excerpt(),
    }
}

/// Fail unless the response carries exactly `status`
pub(crate) fn ensure_status(path: &str, resp: &ApiResponse, status: u16) -> Result<()> {
    if resp.status == status {
        Ok(())
    } else {
        Err(unexpected(path, resp))
    }
}

/// Parse the response body as JSON, reporting the path on failure
pub(crate) fn json_body(path: &str, resp: &ApiResponse) -> Result<Value> {
    serde_json::from_str(&resp.body).map_err(|e| Error::payload(path, e.to_string()))
}

/// The session token the login step stored
pub(crate) fn bearer(ctx: &Context) -> Result<String> {
    ctx.require_str(keys::TOKEN)
}
