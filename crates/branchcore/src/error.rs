use thiserror::Error;

/// Fault raised by a task body during invocation.
///
/// The executor swallows these into a failed log entry; they never abort a
/// run. The detail string is still surfaced on the `TaskFailed` event.
#[derive(Error, Debug, Clone)]
pub enum TaskError {
    #[error("Missing required argument: {0}")]
    MissingArg(String),

    #[error("Invalid argument type for '{field}': expected {expected}, got {actual}")]
    InvalidArgType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}
