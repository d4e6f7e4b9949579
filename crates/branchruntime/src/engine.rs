use crate::{FlowExecutor, TaskRegistry};
use branchcore::{EventBus, ExecutionEvent, ExecutionResult, Flow};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Bundles the registry, executor and event bus for one process.
///
/// The registry is fixed at construction and read-only afterwards.
pub struct FlowEngine {
    registry: Arc<TaskRegistry>,
    executor: FlowExecutor,
    event_bus: Arc<EventBus>,
}

impl FlowEngine {
    /// Create an engine with default settings
    pub fn new(registry: Arc<TaskRegistry>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(registry: Arc<TaskRegistry>, config: EngineConfig) -> Self {
        Self {
            registry,
            executor: FlowExecutor::new(),
            event_bus: Arc::new(EventBus::new(config.event_buffer_size)),
        }
    }

    /// Access the task registry
    pub fn registry(&self) -> &Arc<TaskRegistry> {
        &self.registry
    }

    /// Run one flow to completion or abort
    pub async fn execute(&self, flow: &Flow) -> ExecutionResult {
        self.executor
            .execute(flow, &self.registry, &self.event_bus)
            .await
    }

    /// Subscribe to execution events
    pub fn subscribe_events(&self) -> broadcast::Receiver<ExecutionEvent> {
        self.event_bus.subscribe()
    }

    /// Get the event bus for direct access
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }
}

/// Configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub event_buffer_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 1000,
        }
    }
}
