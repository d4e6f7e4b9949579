use crate::registry::TaskRegistry;
use branchcore::{
    EventBus, ExecutionEvent, ExecutionId, ExecutionLogEntry, ExecutionResult, Flow, Outcome,
    ParamSpec, TaskArgs, END_TASK,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Walks a flow's condition graph one task at a time.
///
/// The walk is strictly sequential: one task runs to completion before the
/// next is resolved. All per-run state (log, previous outputs, the failed
/// flag) is local to a single call, so one executor can serve any number of
/// concurrent runs.
#[derive(Default)]
pub struct FlowExecutor;

impl FlowExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run a flow to completion or abort.
    ///
    /// Every way out of a run is encoded in the returned
    /// [`ExecutionResult`]; this call itself cannot fail.
    pub async fn execute(
        &self,
        flow: &Flow,
        registry: &TaskRegistry,
        event_bus: &EventBus,
    ) -> ExecutionResult {
        let execution_id = ExecutionId::new_v4();
        let start_time = Instant::now();

        event_bus.emit(ExecutionEvent::FlowStarted {
            execution_id,
            flow_id: flow.id,
            flow_name: flow.name.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!("Starting flow execution: {} ({})", flow.name, flow.id);

        let result = self.walk(flow, registry, event_bus, execution_id).await;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        event_bus.emit(ExecutionEvent::FlowFinished {
            execution_id,
            status: result.status(),
            duration_ms,
            timestamp: Utc::now(),
        });

        result
    }

    async fn walk(
        &self,
        flow: &Flow,
        registry: &TaskRegistry,
        event_bus: &EventBus,
        execution_id: ExecutionId,
    ) -> ExecutionResult {
        let mut log: Vec<ExecutionLogEntry> = Vec::new();
        let mut current = flow.start_task.clone();
        let mut previous_outputs: HashMap<String, Value> = HashMap::new();
        let mut flow_failed = false;

        while current != END_TASK {
            let Some(task) = registry.get(&current) else {
                // The missing task is never logged.
                let message = format!("Task '{}' not found in registry", current);
                tracing::warn!("Aborting flow {}: {}", flow.id, message);
                return ExecutionResult::Failure {
                    message,
                    execution_log: log,
                };
            };

            let condition = flow.condition_for(&current);
            let expected_outcome = condition.map(|c| c.outcome);

            // Bind arguments: previous outputs filtered to the declared
            // parameter names. Unmatched outputs are dropped on purpose.
            let param_names: HashSet<String> =
                task.parameters().into_iter().map(|p| p.name).collect();
            let args: HashMap<String, Value> = previous_outputs
                .iter()
                .filter(|(name, _)| param_names.contains(name.as_str()))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();

            event_bus.emit(ExecutionEvent::TaskStarted {
                execution_id,
                task: current.clone(),
                timestamp: Utc::now(),
            });
            let task_start = Instant::now();

            let (succeeded, current_outputs) = match task.invoke(TaskArgs::new(args)).await {
                Ok(outputs) => {
                    event_bus.emit(ExecutionEvent::TaskCompleted {
                        execution_id,
                        task: current.clone(),
                        outputs: outputs.values.clone(),
                        duration_ms: task_start.elapsed().as_millis() as u64,
                        timestamp: Utc::now(),
                    });
                    (true, outputs.values)
                }
                Err(err) => {
                    // The fault becomes a failure outcome and drives
                    // branching like any other; its detail stays out of the
                    // execution log.
                    tracing::warn!("Task '{}' failed: {}", current, err);
                    event_bus.emit(ExecutionEvent::TaskFailed {
                        execution_id,
                        task: current.clone(),
                        error: err.to_string(),
                        duration_ms: task_start.elapsed().as_millis() as u64,
                        timestamp: Utc::now(),
                    });
                    (false, HashMap::new())
                }
            };

            log.push(ExecutionLogEntry {
                task: current.clone(),
                expected_outcome,
                success: succeeded,
                output: succeeded.then(|| current_outputs.clone()),
            });

            let actual_outcome = Outcome::from_success(succeeded);

            // No condition for this task, or a condition whose selected
            // branch has no declared target: the run stops here,
            // successfully.
            let Some(next) = condition.and_then(|c| c.resolve_target(actual_outcome)) else {
                break;
            };
            let next = next.to_string();

            // Validate the hand-off against whichever task was resolved as
            // next, whether or not the branch matched expectation.
            if next != END_TASK {
                if let Some(next_task) = registry.get(&next) {
                    if let Err(message) = validate_handoff(
                        &current,
                        &next,
                        &current_outputs,
                        &next_task.parameters(),
                    ) {
                        tracing::warn!("Aborting flow {}: {}", flow.id, message);
                        return ExecutionResult::Failure {
                            message,
                            execution_log: log,
                        };
                    }
                }
            }

            // A diverging branch marks the whole run failed; execution still
            // continues along the resolved target. The flag is sticky.
            if let Some(c) = condition {
                if !c.matches(actual_outcome) {
                    flow_failed = true;
                }
            }

            previous_outputs = current_outputs;
            current = next;
        }

        if flow_failed {
            ExecutionResult::Failed {
                flow_id: flow.id,
                flow_name: flow.name.clone(),
                execution_log: log,
            }
        } else {
            ExecutionResult::Completed {
                flow_id: flow.id,
                flow_name: flow.name.clone(),
                execution_log: log,
            }
        }
    }
}

/// Check that a task's outputs fit the next task's declared parameters.
///
/// Offender lists are sorted so abort messages come out deterministic
/// regardless of output map ordering.
fn validate_handoff(
    current: &str,
    next: &str,
    outputs: &HashMap<String, Value>,
    next_params: &[ParamSpec],
) -> Result<(), String> {
    let accepted: HashSet<&str> = next_params.iter().map(|p| p.name.as_str()).collect();

    let mut incompatible: Vec<&str> = outputs
        .keys()
        .map(|name| name.as_str())
        .filter(|name| !accepted.contains(name))
        .collect();
    incompatible.sort_unstable();
    if !incompatible.is_empty() {
        return Err(format!(
            "Task '{}' does not accept outputs from '{}': {:?}",
            next, current, incompatible
        ));
    }

    let missing: Vec<&str> = next_params
        .iter()
        .filter(|p| p.required && !outputs.contains_key(&p.name))
        .map(|p| p.name.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(format!(
            "Task '{}' is missing required parameters from previous task '{}': {:?}",
            next, current, missing
        ));
    }

    Ok(())
}
