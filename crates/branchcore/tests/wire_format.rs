use branchcore::{ExecutionLogEntry, ExecutionResult, Flow, FlowStatus, Outcome};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

#[test]
fn completed_result_serializes_with_flow_identity() {
    let result = ExecutionResult::Completed {
        flow_id: Uuid::nil(),
        flow_name: "etl".to_string(),
        execution_log: vec![ExecutionLogEntry {
            task: "a".to_string(),
            expected_outcome: Some(Outcome::Success),
            success: true,
            output: Some(HashMap::from([("x".to_string(), json!(1))])),
        }],
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "status": "completed",
            "flow_id": "00000000-0000-0000-0000-000000000000",
            "flow_name": "etl",
            "execution_log": [{
                "task": "a",
                "expected_outcome": "success",
                "success": true,
                "output": { "x": 1 }
            }]
        })
    );
}

#[test]
fn failure_result_omits_flow_identity() {
    let result = ExecutionResult::Failure {
        message: "Task 'b' not found in registry".to_string(),
        execution_log: Vec::new(),
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "status": "failure",
            "message": "Task 'b' not found in registry",
            "execution_log": []
        })
    );
}

#[test]
fn failed_log_entry_serializes_null_output() {
    let entry = ExecutionLogEntry {
        task: "a".to_string(),
        expected_outcome: None,
        success: false,
        output: None,
    };

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        value,
        json!({
            "task": "a",
            "expected_outcome": null,
            "success": false,
            "output": null
        })
    );
}

#[test]
fn flow_deserializes_from_plain_json() {
    let flow: Flow = serde_json::from_str(
        r#"{
            "id": "3f8f9a44-9b5d-4f54-a29c-5a5cf04f4326",
            "name": "deploy",
            "start_task": "build",
            "conditions": [
                {
                    "source_task": "build",
                    "outcome": "success",
                    "target_task_success": "release",
                    "target_task_failure": "end"
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(flow.name, "deploy");
    assert_eq!(flow.start_task, "build");
    let condition = flow.condition_for("build").unwrap();
    assert_eq!(condition.outcome, Outcome::Success);
    assert_eq!(condition.resolve_target(Outcome::Success), Some("release"));
    assert_eq!(condition.resolve_target(Outcome::Failure), Some("end"));
    assert!(flow.condition_for("release").is_none());
}

#[test]
fn conditions_default_to_empty() {
    let flow: Flow = serde_json::from_str(
        r#"{"id": "3f8f9a44-9b5d-4f54-a29c-5a5cf04f4326", "name": "bare", "start_task": "solo"}"#,
    )
    .unwrap();

    assert!(flow.conditions.is_empty());
}

#[test]
fn absent_targets_resolve_to_none() {
    let flow: Flow = serde_json::from_str(
        r#"{
            "id": "3f8f9a44-9b5d-4f54-a29c-5a5cf04f4326",
            "name": "dangling",
            "start_task": "a",
            "conditions": [
                { "source_task": "a", "outcome": "success", "target_task_success": "b" }
            ]
        }"#,
    )
    .unwrap();

    let condition = flow.condition_for("a").unwrap();
    assert_eq!(condition.resolve_target(Outcome::Success), Some("b"));
    assert_eq!(condition.resolve_target(Outcome::Failure), None);
}

#[test]
fn flow_status_displays_lowercase() {
    assert_eq!(FlowStatus::Completed.to_string(), "completed");
    assert_eq!(FlowStatus::Failed.to_string(), "failed");
    assert_eq!(FlowStatus::Failure.to_string(), "failure");
}
