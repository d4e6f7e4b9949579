//! Built-in task library
//!
//! Collection of ready-made tasks the binaries register at startup.

mod data;
mod debug;
mod http;
mod time;

pub use data::{ExtractTask, LoadTask, TransformTask};
pub use debug::EchoTask;
pub use http::FetchTask;
pub use time::DelayTask;

use branchruntime::TaskRegistry;
use std::sync::Arc;

/// Register all built-in tasks with a registry
pub fn register_all(registry: &mut TaskRegistry) {
    registry.register(Arc::new(data::ExtractTask));
    registry.register(Arc::new(data::TransformTask));
    registry.register(Arc::new(data::LoadTask));
    registry.register(Arc::new(debug::EchoTask));
    registry.register(Arc::new(time::DelayTask));
    registry.register(Arc::new(http::FetchTask::new()));
}
