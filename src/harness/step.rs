//! Step and outcome types

use std::fmt;
use std::future::Future;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Serialize;

use super::context::Context;
use crate::common::Result;

/// Result of one step's action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Success { detail: Option<String> },
    Failure { reason: String },
}

impl Outcome {
    pub fn passed() -> Self {
        Self::Success { detail: None }
    }

    pub fn passed_with(detail: impl Into<String>) -> Self {
        Self::Success {
            detail: Some(detail.into()),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

type Action = Box<dyn Fn(Context) -> BoxFuture<'static, Result<Outcome>> + Send + Sync>;

/// One named, independently failable unit of scenario logic.
///
/// The action receives a handle to the run context and may read keys written
/// by earlier steps and write keys for later ones. Returning an `Err` is
/// equivalent to returning a `Failure`; the runner records it either way.
pub struct Step {
    name: String,
    gate: bool,
    action: Action,
}

impl Step {
    pub fn new<F, Fut>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Outcome>> + Send + 'static,
    {
        Self {
            name: name.into(),
            gate: false,
            action: Box::new(move |ctx| action(ctx).boxed()),
        }
    }

    /// Mark this step as a gate: if it fails, all remaining main-phase steps
    /// are skipped (cleanup still runs)
    pub fn gate(mut self) -> Self {
        self.gate = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_gate(&self) -> bool {
        self.gate
    }

    pub(crate) fn invoke(&self, ctx: Context) -> BoxFuture<'static, Result<Outcome>> {
        (self.action)(ctx)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
