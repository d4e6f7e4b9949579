use async_trait::async_trait;
use branchcore::{ParamSpec, Task, TaskArgs, TaskError, TaskOutputs};
use serde_json::Value;

/// Simple task that logs its message and passes it along
pub struct EchoTask;

#[async_trait]
impl Task for EchoTask {
    fn name(&self) -> &str {
        "echo"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional("message")]
    }

    async fn invoke(&self, args: TaskArgs) -> Result<TaskOutputs, TaskError> {
        let message = args
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("(no message)")
            .to_string();

        tracing::info!("ECHO: {}", message);

        Ok(TaskOutputs::new().with_value("message", message))
    }
}
