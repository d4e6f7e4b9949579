use crate::{FlowId, FlowStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

pub type ExecutionId = Uuid;

/// Events emitted during flow execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExecutionEvent {
    FlowStarted {
        execution_id: ExecutionId,
        flow_id: FlowId,
        flow_name: String,
        timestamp: DateTime<Utc>,
    },
    TaskStarted {
        execution_id: ExecutionId,
        task: String,
        timestamp: DateTime<Utc>,
    },
    TaskCompleted {
        execution_id: ExecutionId,
        task: String,
        outputs: HashMap<String, Value>,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
    /// The task body faulted. The run keeps going; the fault detail lives
    /// only here, never in the execution log.
    TaskFailed {
        execution_id: ExecutionId,
        task: String,
        error: String,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
    FlowFinished {
        execution_id: ExecutionId,
        status: FlowStatus,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
}

/// Global event bus
pub struct EventBus {
    sender: broadcast::Sender<ExecutionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ExecutionEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: ExecutionEvent) {
        let _ = self.sender.send(event);
    }
}
