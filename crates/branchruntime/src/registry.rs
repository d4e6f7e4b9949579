use branchcore::{ParamSpec, Task};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of invocable tasks, keyed by name.
///
/// Populated once at startup; the executor only ever looks tasks up, so
/// sharing it behind an `Arc` across concurrent runs is safe.
pub struct TaskRegistry {
    tasks: HashMap<String, Arc<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Register a task under its own name
    pub fn register(&mut self, task: Arc<dyn Task>) {
        let name = task.name().to_string();
        tracing::info!("Registering task: {}", name);
        self.tasks.insert(name, task);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Task>> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered task names, sorted for stable listings
    pub fn task_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tasks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Declared parameter schema of a registered task
    pub fn parameters(&self, name: &str) -> Option<Vec<ParamSpec>> {
        self.tasks.get(name).map(|task| task.parameters())
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
