use crate::{ClientError, EngineClient, Result};
use async_trait::async_trait;
use extask_core::{FailureReport, TaskDefinition, Topic, VariableMap};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// HTTP implementation of the engine gateway.
///
/// `base_url` is the engine's REST root (for a Camunda-style engine this
/// includes the `/engine-rest` prefix). Timeouts are whatever the
/// underlying HTTP client defaults to; wrapping retries or backoff around
/// this client is the caller's concern.
pub struct RestEngineClient {
    base_url: String,
    http: reqwest::Client,
}

impl RestEngineClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client, e.g. with custom timeouts.
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        RestEngineClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Error response body shared by all engine endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, rename = "type")]
    error_type: String,
    #[serde(default)]
    message: String,
}

impl ErrorBody {
    fn into_message(self) -> String {
        if self.error_type.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.error_type
        } else {
            format!("{}: {}", self.error_type, self.message)
        }
    }
}

fn status_error(status: StatusCode, body: ErrorBody) -> ClientError {
    match status {
        StatusCode::BAD_REQUEST => ClientError::InvalidInput(body.into_message()),
        StatusCode::NOT_FOUND => ClientError::NotFound(body.into_message()),
        _ => ClientError::Unexpected(body.into_message()),
    }
}

// Decode failures on the error body are swallowed: the status code alone
// still maps to a meaningful error.
async fn response_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    status_error(status, body)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartProcessRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    business_key: Option<&'a str>,
    variables: &'a VariableMap,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchAndLockRequest<'a> {
    worker_id: &'a str,
    max_tasks: u32,
    use_priority: bool,
    topics: &'a [Topic],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteTaskRequest<'a> {
    worker_id: &'a str,
    variables: &'a VariableMap,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailTaskRequest<'a> {
    worker_id: &'a str,
    #[serde(flatten)]
    report: &'a FailureReport,
}

#[async_trait]
impl EngineClient for RestEngineClient {
    async fn start_process(
        &self,
        process_id: &str,
        business_key: Option<&str>,
        variables: &VariableMap,
    ) -> Result<()> {
        let url = self.url(&format!("/process-definition/key/{}/start", process_id));
        debug!("Starting process instance at {}", url);

        let response = self
            .http
            .post(&url)
            .json(&StartProcessRequest {
                business_key,
                variables,
            })
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(response_error(response).await);
        }

        Ok(())
    }

    async fn fetch_and_lock(
        &self,
        worker_id: &str,
        max_tasks: u32,
        use_priority: bool,
        topics: &[Topic],
    ) -> Result<Vec<TaskDefinition>> {
        let url = self.url("/external-task/fetchAndLock");

        let response = self
            .http
            .post(&url)
            .json(&FetchAndLockRequest {
                worker_id,
                max_tasks,
                use_priority,
                topics,
            })
            .send()
            .await?;

        // Unlike the report endpoints, fetch errors carry no finer
        // category: anything that is not a task array is unexpected.
        if response.status() != StatusCode::OK {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(ClientError::Unexpected(body.into_message()));
        }

        let mut tasks: Vec<TaskDefinition> = response.json().await?;
        for task in &mut tasks {
            task.worker_id = worker_id.to_string();
        }

        debug!("Fetched {} task(s) for worker {}", tasks.len(), worker_id);
        Ok(tasks)
    }

    async fn complete_task(
        &self,
        worker_id: &str,
        task_id: &str,
        variables: &VariableMap,
    ) -> Result<()> {
        let url = self.url(&format!("/external-task/{}/complete", task_id));
        debug!("Completing task {} as worker {}", task_id, worker_id);

        let response = self
            .http
            .post(&url)
            .json(&CompleteTaskRequest {
                worker_id,
                variables,
            })
            .send()
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(response_error(response).await);
        }

        Ok(())
    }

    async fn fail_task(
        &self,
        worker_id: &str,
        task_id: &str,
        report: &FailureReport,
    ) -> Result<()> {
        let url = self.url(&format!("/external-task/{}/failure", task_id));
        debug!("Failing task {} as worker {}", task_id, worker_id);

        let response = self
            .http
            .post(&url)
            .json(&FailTaskRequest { worker_id, report })
            .send()
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(response_error(response).await);
        }

        Ok(())
    }
}
