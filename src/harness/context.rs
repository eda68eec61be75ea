//! Shared run context
//!
//! A key-value store threading resource identifiers between steps within one
//! run. Only the runner and the currently executing step touch it, and steps
//! run strictly one at a time, so the lock never sees contention; it exists
//! to let step futures share the handle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::common::{Error, Result};

/// Shared key-value store for one scenario run.
///
/// Cloning produces another handle to the same store.
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, replacing any previous value
    pub fn put(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.lock().insert(key.into(), value.into());
    }

    /// Fetch a value, if a producing step stored one
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    /// Fetch a value rendered as a path segment (strings unquoted, numbers
    /// as written)
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).map(render)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Fetch a required value, failing with a dependency error naming the
    /// key when it was never produced
    pub fn require(&self, key: &str) -> Result<Value> {
        self.get(key)
            .ok_or_else(|| Error::DependencyMissing(key.to_string()))
    }

    /// Like [`Context::require`], rendered as a path segment
    pub fn require_str(&self, key: &str) -> Result<String> {
        self.require(key).map(render)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoning panic inside a step is already downgraded to a step
        // failure; the store itself stays usable.
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn render(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_and_get() {
        let ctx = Context::new();
        ctx.put("class_id", json!(42));
        assert_eq!(ctx.get("class_id"), Some(json!(42)));
        assert!(ctx.contains("class_id"));
        assert!(!ctx.contains("student_id"));
    }

    #[test]
    fn test_require_missing_names_the_key() {
        let ctx = Context::new();
        let err = ctx.require("created class id").unwrap_err();
        assert!(matches!(err, Error::DependencyMissing(_)));
        assert!(err.to_string().contains("created class id"));
    }

    #[test]
    fn test_require_str_renders_scalars_unquoted() {
        let ctx = Context::new();
        ctx.put("numeric_id", json!(7));
        ctx.put("uuid", json!("ab-12"));
        assert_eq!(ctx.require_str("numeric_id").unwrap(), "7");
        assert_eq!(ctx.require_str("uuid").unwrap(), "ab-12");
    }

    #[test]
    fn test_clones_share_the_store() {
        let ctx = Context::new();
        let handle = ctx.clone();
        handle.put("token", json!("abc"));
        assert_eq!(ctx.get_str("token").as_deref(), Some("abc"));
    }
}
