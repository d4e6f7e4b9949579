use branchcore::{Task, TaskArgs, TaskError};
use branchtasks::{DelayTask, EchoTask, ExtractTask, FetchTask, LoadTask, TransformTask};
use serde_json::{json, Value};

// Helper to build bound arguments for a task
fn args(pairs: &[(&str, Value)]) -> TaskArgs {
    TaskArgs::new(
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    )
}

#[tokio::test]
async fn extract_produces_records() {
    let output = ExtractTask.invoke(TaskArgs::default()).await.unwrap();

    let records = output.values.get("records").unwrap().as_array().unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn transform_lowercases_names_by_default() {
    let output = TransformTask
        .invoke(args(&[("records", json!([{"id": 1, "name": "Alpha"}]))]))
        .await
        .unwrap();

    let records = output.values.get("records").unwrap();
    assert_eq!(records[0]["name"], json!("alpha"));
}

#[tokio::test]
async fn transform_uppercases_on_request() {
    let output = TransformTask
        .invoke(args(&[
            ("records", json!([{"id": 1, "name": "Alpha"}])),
            ("uppercase", json!(true)),
        ]))
        .await
        .unwrap();

    let records = output.values.get("records").unwrap();
    assert_eq!(records[0]["name"], json!("ALPHA"));
}

#[tokio::test]
async fn transform_rejects_missing_records() {
    let err = TransformTask.invoke(TaskArgs::default()).await.unwrap_err();

    assert!(matches!(err, TaskError::MissingArg(name) if name == "records"));
}

#[tokio::test]
async fn transform_rejects_non_array_records() {
    let err = TransformTask
        .invoke(args(&[("records", json!("not-an-array"))]))
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::InvalidArgType { .. }));
}

#[tokio::test]
async fn load_counts_records() {
    let output = LoadTask
        .invoke(args(&[("records", json!([{"id": 1}, {"id": 2}]))]))
        .await
        .unwrap();

    assert_eq!(output.values.get("loaded"), Some(&json!(2)));
}

#[tokio::test]
async fn echo_defaults_its_message() {
    let output = EchoTask.invoke(TaskArgs::default()).await.unwrap();

    assert_eq!(output.values.get("message"), Some(&json!("(no message)")));
}

#[tokio::test]
async fn delay_passes_message_through() {
    let output = DelayTask
        .invoke(args(&[("duration_ms", json!(1)), ("message", json!("hi"))]))
        .await
        .unwrap();

    assert_eq!(output.values.get("message"), Some(&json!("hi")));
}

#[tokio::test]
async fn fetch_reports_invalid_urls_as_execution_failures() {
    let err = FetchTask::new()
        .invoke(args(&[("url", json!("not a url"))]))
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::ExecutionFailed(_)));
}

#[tokio::test]
async fn fetch_requires_a_string_url() {
    let err = FetchTask::new()
        .invoke(args(&[("url", json!(42))]))
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::InvalidArgType { .. }));
}
