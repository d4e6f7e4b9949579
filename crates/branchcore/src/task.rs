use crate::TaskError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Declared parameter of a task.
///
/// A required parameter has no default; the hand-off validator insists the
/// previous task supplies it. Optional parameters apply their defaults
/// inside the task body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Core trait that all invocable tasks implement
#[async_trait]
pub trait Task: Send + Sync {
    /// Registry name (e.g. "extract")
    fn name(&self) -> &str;

    /// Declared parameter schema.
    ///
    /// The executor binds arguments and validates hand-offs purely against
    /// this list; it never introspects the task body.
    fn parameters(&self) -> Vec<ParamSpec> {
        Vec::new()
    }

    /// Execute the task with arguments bound from the previous task's outputs
    async fn invoke(&self, args: TaskArgs) -> Result<TaskOutputs, TaskError>;
}

/// Arguments bound for one invocation
#[derive(Debug, Clone, Default)]
pub struct TaskArgs {
    pub values: HashMap<String, Value>,
}

impl TaskArgs {
    pub fn new(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get required argument or return error
    pub fn require(&self, name: &str) -> Result<&Value, TaskError> {
        self.values
            .get(name)
            .ok_or_else(|| TaskError::MissingArg(name.to_string()))
    }

    /// Get required argument as a string
    pub fn require_str(&self, name: &str) -> Result<&str, TaskError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| TaskError::InvalidArgType {
                field: name.to_string(),
                expected: "string".to_string(),
                actual: "other".to_string(),
            })
    }

    /// Get argument with default
    pub fn get_or(&self, name: &str, default: Value) -> Value {
        self.values.get(name).cloned().unwrap_or(default)
    }
}

/// Named outputs produced by one invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskOutputs {
    pub values: HashMap<String, Value>,
}

impl TaskOutputs {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}
