use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type FlowId = Uuid;

/// Sentinel task name that terminates a run.
pub const END_TASK: &str = "end";

/// Desired or actual result of one task invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn from_success(succeeded: bool) -> Self {
        if succeeded {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
        }
    }
}

/// Complete flow definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: FlowId,
    pub name: String,
    pub start_task: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Flow {
    pub fn new(name: impl Into<String>, start_task: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_task: start_task.into(),
            conditions: Vec::new(),
        }
    }

    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// First condition declared for a source task.
    ///
    /// Flows are expected to declare at most one condition per source task;
    /// if that is violated, the first match wins.
    pub fn condition_for(&self, task: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.source_task == task)
    }
}

/// Branching rule binding a source task to its two possible successors.
///
/// `outcome` is the outcome the flow author wants from `source_task`. When
/// the actual outcome matches it, execution continues at
/// `target_task_success`, otherwise at `target_task_failure`. Either target
/// may name a task, name [`END_TASK`], or be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub source_task: String,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_task_success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_task_failure: Option<String>,
}

impl Condition {
    pub fn new(source_task: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            source_task: source_task.into(),
            outcome,
            target_task_success: None,
            target_task_failure: None,
        }
    }

    /// Successor when the actual outcome matches the desired one
    pub fn on_match(mut self, target: impl Into<String>) -> Self {
        self.target_task_success = Some(target.into());
        self
    }

    /// Successor when the actual outcome diverges from the desired one
    pub fn on_mismatch(mut self, target: impl Into<String>) -> Self {
        self.target_task_failure = Some(target.into());
        self
    }

    /// Whether the actual outcome is the one this condition wants
    pub fn matches(&self, actual: Outcome) -> bool {
        self.outcome == actual
    }

    /// Successor selected by the actual outcome.
    ///
    /// `None` means the selected branch has no declared target.
    pub fn resolve_target(&self, actual: Outcome) -> Option<&str> {
        if self.matches(actual) {
            self.target_task_success.as_deref()
        } else {
            self.target_task_failure.as_deref()
        }
    }
}
