//! Flow execution runtime
//!
//! This crate provides the sequential flow executor, the task registry it
//! resolves names against, and the engine wrapper that binds both to an
//! event bus.

mod engine;
mod executor;
mod lint;
mod registry;

pub use engine::{EngineConfig, FlowEngine};
pub use executor::FlowExecutor;
pub use lint::{lint_flow, LintIssue};
pub use registry::TaskRegistry;
