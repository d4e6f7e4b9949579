use async_trait::async_trait;
use branchcore::{Condition, Flow, Outcome, Task, TaskArgs, TaskError, TaskOutputs, END_TASK};
use branchruntime::{lint_flow, LintIssue, TaskRegistry};
use std::sync::Arc;

struct NamedTask(&'static str);

#[async_trait]
impl Task for NamedTask {
    fn name(&self) -> &str {
        self.0
    }

    async fn invoke(&self, _args: TaskArgs) -> Result<TaskOutputs, TaskError> {
        Ok(TaskOutputs::new())
    }
}

fn registry_with(names: &[&'static str]) -> TaskRegistry {
    let mut registry = TaskRegistry::new();
    for name in names {
        registry.register(Arc::new(NamedTask(name)));
    }
    registry
}

#[test]
fn clean_flow_has_no_issues() {
    let registry = registry_with(&["a", "b"]);
    let mut flow = Flow::new("clean", "a");
    flow.add_condition(
        Condition::new("a", Outcome::Success)
            .on_match("b")
            .on_mismatch(END_TASK),
    );
    flow.add_condition(Condition::new("b", Outcome::Success).on_match(END_TASK));

    assert!(lint_flow(&flow, &registry).is_empty());
}

#[test]
fn reports_unknown_start_and_targets() {
    let registry = registry_with(&["a"]);
    let mut flow = Flow::new("broken", "zero");
    flow.add_condition(Condition::new("a", Outcome::Success).on_match("ghost"));

    let issues = lint_flow(&flow, &registry);

    assert!(issues.contains(&LintIssue::UnknownStartTask("zero".to_string())));
    assert!(issues.contains(&LintIssue::UnknownTarget {
        source: "a".to_string(),
        target: "ghost".to_string(),
    }));
}

#[test]
fn reports_duplicate_conditions_once() {
    let registry = registry_with(&["a", "b"]);
    let mut flow = Flow::new("dups", "a");
    flow.add_condition(Condition::new("a", Outcome::Success).on_match("b"));
    flow.add_condition(Condition::new("a", Outcome::Failure).on_match("b"));
    flow.add_condition(Condition::new("a", Outcome::Success).on_match(END_TASK));

    let issues = lint_flow(&flow, &registry);

    let duplicates: Vec<_> = issues
        .iter()
        .filter(|issue| matches!(issue, LintIssue::DuplicateCondition(_)))
        .collect();
    assert_eq!(duplicates.len(), 1);
}

#[test]
fn reports_cycles() {
    let registry = registry_with(&["a", "b"]);
    let mut flow = Flow::new("cyclic", "a");
    flow.add_condition(Condition::new("a", Outcome::Success).on_match("b"));
    flow.add_condition(Condition::new("b", Outcome::Success).on_match("a"));

    let issues = lint_flow(&flow, &registry);

    assert!(issues.contains(&LintIssue::Cycle));
}
