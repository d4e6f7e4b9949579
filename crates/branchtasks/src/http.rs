use async_trait::async_trait;
use branchcore::{ParamSpec, Task, TaskArgs, TaskError, TaskOutputs};

/// HTTP GET task
pub struct FetchTask {
    client: reqwest::Client,
}

impl FetchTask {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for FetchTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Task for FetchTask {
    fn name(&self) -> &str {
        "fetch"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required("url")]
    }

    async fn invoke(&self, args: TaskArgs) -> Result<TaskOutputs, TaskError> {
        let url = args.require_str("url")?;

        tracing::info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TaskError::ExecutionFailed(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TaskError::ExecutionFailed(format!("Failed to read response: {}", e)))?;

        Ok(TaskOutputs::new()
            .with_value("status", status)
            .with_value("body", body))
    }
}
