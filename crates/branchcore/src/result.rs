use crate::{FlowId, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Terminal status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    /// Reached an end state with every branch matching its desired outcome
    Completed,
    /// Reached an end state, but at least one branch diverged from its
    /// desired outcome along the way
    Failed,
    /// Aborted early on a structural problem (unknown task, incompatible
    /// hand-off)
    Failure,
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStatus::Completed => write!(f, "completed"),
            FlowStatus::Failed => write!(f, "failed"),
            FlowStatus::Failure => write!(f, "failure"),
        }
    }
}

/// One entry per task actually invoked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLogEntry {
    pub task: String,
    /// Outcome the flow's condition wanted from this task, if one existed
    pub expected_outcome: Option<Outcome>,
    pub success: bool,
    /// Output mapping; absent when the task failed
    pub output: Option<HashMap<String, Value>>,
}

/// Terminal artifact of a run, tagged by status.
///
/// `completed` and `failed` carry the flow identity; `failure` carries the
/// abort message instead, matching the two early-return shapes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionResult {
    Completed {
        flow_id: FlowId,
        flow_name: String,
        execution_log: Vec<ExecutionLogEntry>,
    },
    Failed {
        flow_id: FlowId,
        flow_name: String,
        execution_log: Vec<ExecutionLogEntry>,
    },
    Failure {
        message: String,
        execution_log: Vec<ExecutionLogEntry>,
    },
}

impl ExecutionResult {
    pub fn status(&self) -> FlowStatus {
        match self {
            ExecutionResult::Completed { .. } => FlowStatus::Completed,
            ExecutionResult::Failed { .. } => FlowStatus::Failed,
            ExecutionResult::Failure { .. } => FlowStatus::Failure,
        }
    }

    pub fn execution_log(&self) -> &[ExecutionLogEntry] {
        match self {
            ExecutionResult::Completed { execution_log, .. }
            | ExecutionResult::Failed { execution_log, .. }
            | ExecutionResult::Failure { execution_log, .. } => execution_log,
        }
    }

    /// Abort message; present only for `failure`
    pub fn message(&self) -> Option<&str> {
        match self {
            ExecutionResult::Failure { message, .. } => Some(message),
            _ => None,
        }
    }
}
