use crate::TaskRegistry;
use branchcore::{Flow, END_TASK};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Structural problem found in a flow definition.
///
/// These are advisory. The executor runs whatever it is given and reports
/// problems through its own result statuses; in particular it performs no
/// cycle detection, so a cyclic flow walks until interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintIssue {
    UnknownStartTask(String),

    UnknownTarget { source: String, target: String },

    DuplicateCondition(String),

    Cycle,
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintIssue::UnknownStartTask(name) => {
                write!(f, "Start task '{}' is not a registered task", name)
            }
            LintIssue::UnknownTarget { source, target } => write!(
                f,
                "Condition for '{}' targets unknown task '{}'",
                source, target
            ),
            LintIssue::DuplicateCondition(name) => write!(
                f,
                "Multiple conditions declared for task '{}'; only the first is used",
                name
            ),
            LintIssue::Cycle => write!(
                f,
                "Conditions form a cycle; execution would never reach an end state"
            ),
        }
    }
}

impl std::error::Error for LintIssue {}

/// Lint a flow against a registry before running it.
pub fn lint_flow(flow: &Flow, registry: &TaskRegistry) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    if flow.start_task != END_TASK && !registry.contains(&flow.start_task) {
        issues.push(LintIssue::UnknownStartTask(flow.start_task.clone()));
    }

    let mut seen = HashSet::new();
    let mut flagged = HashSet::new();
    for condition in &flow.conditions {
        if !seen.insert(condition.source_task.as_str())
            && flagged.insert(condition.source_task.as_str())
        {
            issues.push(LintIssue::DuplicateCondition(condition.source_task.clone()));
        }

        for target in condition
            .target_task_success
            .iter()
            .chain(condition.target_task_failure.iter())
        {
            if target != END_TASK && !registry.contains(target) {
                issues.push(LintIssue::UnknownTarget {
                    source: condition.source_task.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    // Cycle check over the task-name graph spanned by the conditions
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut index_of: HashMap<String, NodeIndex> = HashMap::new();
    for condition in &flow.conditions {
        let from = node_index(&mut graph, &mut index_of, &condition.source_task);
        for target in condition
            .target_task_success
            .iter()
            .chain(condition.target_task_failure.iter())
        {
            if target == END_TASK {
                continue;
            }
            let to = node_index(&mut graph, &mut index_of, target);
            graph.add_edge(from, to, ());
        }
    }
    if toposort(&graph, None).is_err() {
        issues.push(LintIssue::Cycle);
    }

    issues
}

fn node_index(
    graph: &mut DiGraph<String, ()>,
    index_of: &mut HashMap<String, NodeIndex>,
    name: &str,
) -> NodeIndex {
    if let Some(idx) = index_of.get(name) {
        *idx
    } else {
        let idx = graph.add_node(name.to_string());
        index_of.insert(name.to_string(), idx);
        idx
    }
}
