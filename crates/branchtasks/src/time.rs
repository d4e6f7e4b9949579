use async_trait::async_trait;
use branchcore::{ParamSpec, Task, TaskArgs, TaskError, TaskOutputs};
use serde_json::Value;
use tokio::time::{sleep, Duration};

/// Delay execution for a specified duration
pub struct DelayTask;

#[async_trait]
impl Task for DelayTask {
    fn name(&self) -> &str {
        "delay"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::optional("duration_ms"),
            ParamSpec::optional("message"),
        ]
    }

    async fn invoke(&self, args: TaskArgs) -> Result<TaskOutputs, TaskError> {
        let duration_ms = args
            .get("duration_ms")
            .and_then(Value::as_u64)
            .unwrap_or(1000);

        tracing::info!("Delaying for {}ms", duration_ms);

        sleep(Duration::from_millis(duration_ms)).await;

        // Pass the message through when one was handed in
        let mut outputs = TaskOutputs::new();
        if let Some(message) = args.get("message") {
            outputs = outputs.with_value("message", message.clone());
        }

        Ok(outputs)
    }
}
