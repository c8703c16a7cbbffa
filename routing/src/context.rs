//! Open task context passed alongside the task text.
//!
//! Callers may attach arbitrary keys. Nothing here fails on a missing or
//! mistyped value; accessors return `None` and callers fall back to
//! defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed context map accompanying a routing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskContext {
    values: Map<String, Value>,
}

impl TaskContext {
    /// Empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any JSON value. Non-objects yield an empty context.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    /// Add a key (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Numeric value for `key`, if present and a number.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    /// Caller-supplied correlation id, used only in log fields.
    pub fn task_id(&self) -> Option<&str> {
        self.get_str("task_id")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_becomes_empty() {
        assert!(TaskContext::from_value(json!([1, 2, 3])).is_empty());
        assert!(TaskContext::from_value(Value::Null).is_empty());
    }

    #[test]
    fn test_typed_accessors_tolerate_wrong_types() {
        let ctx = TaskContext::from_value(json!({"task_id": 42, "budget": "high"}));
        assert_eq!(ctx.task_id(), None);
        assert_eq!(ctx.get_f64("budget"), None);
        assert_eq!(ctx.get_f64("missing"), None);
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_builder() {
        let ctx = TaskContext::new().with("task_id", "t-1").with("priority", 3);
        assert_eq!(ctx.task_id(), Some("t-1"));
        assert_eq!(ctx.get_f64("priority"), Some(3.0));
    }
}
