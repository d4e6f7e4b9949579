use async_trait::async_trait;
use branchcore::{ParamSpec, Task, TaskArgs, TaskError, TaskOutputs};
use serde_json::{json, Value};

/// Produce a fixed batch of demo records
pub struct ExtractTask;

#[async_trait]
impl Task for ExtractTask {
    fn name(&self) -> &str {
        "extract"
    }

    async fn invoke(&self, _args: TaskArgs) -> Result<TaskOutputs, TaskError> {
        let records = json!([
            { "id": 1, "name": "alpha" },
            { "id": 2, "name": "beta" },
            { "id": 3, "name": "gamma" }
        ]);

        Ok(TaskOutputs::new().with_value("records", records))
    }
}

/// Normalize record names; uppercases instead when asked to
pub struct TransformTask;

#[async_trait]
impl Task for TransformTask {
    fn name(&self) -> &str {
        "transform"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("records"),
            ParamSpec::optional("uppercase"),
        ]
    }

    async fn invoke(&self, args: TaskArgs) -> Result<TaskOutputs, TaskError> {
        let records = args
            .require("records")?
            .as_array()
            .cloned()
            .ok_or_else(|| TaskError::InvalidArgType {
                field: "records".to_string(),
                expected: "array".to_string(),
                actual: "other".to_string(),
            })?;

        let uppercase = args
            .get("uppercase")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let transformed: Vec<Value> = records
            .into_iter()
            .map(|mut record| {
                if let Some(name) = record.get("name").and_then(Value::as_str) {
                    let name = if uppercase {
                        name.to_uppercase()
                    } else {
                        name.to_lowercase()
                    };
                    record["name"] = Value::String(name);
                }
                record
            })
            .collect();

        Ok(TaskOutputs::new().with_value("records", Value::Array(transformed)))
    }
}

/// Sink for transformed records; reports how many arrived
pub struct LoadTask;

#[async_trait]
impl Task for LoadTask {
    fn name(&self) -> &str {
        "load"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required("records")]
    }

    async fn invoke(&self, args: TaskArgs) -> Result<TaskOutputs, TaskError> {
        let count = args
            .require("records")?
            .as_array()
            .map(|records| records.len())
            .unwrap_or(0);

        tracing::info!("Loaded {} records", count);

        Ok(TaskOutputs::new().with_value("loaded", count as u64))
    }
}
