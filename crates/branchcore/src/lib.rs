//! Core abstractions for the branchflow engine
//!
//! This crate provides the fundamental types and traits that all other
//! components depend on: flow definitions, the task contract, execution
//! results, and the event types emitted while a flow runs.

mod error;
mod events;
mod flow;
mod result;
mod task;

pub use error::TaskError;
pub use events::{EventBus, ExecutionEvent, ExecutionId};
pub use flow::{Condition, Flow, FlowId, Outcome, END_TASK};
pub use result::{ExecutionLogEntry, ExecutionResult, FlowStatus};
pub use task::{ParamSpec, Task, TaskArgs, TaskOutputs};
