mod rest;

pub use rest::RestEngineClient;

use async_trait::async_trait;
use extask_core::{FailureReport, TaskDefinition, Topic, VariableMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// 400 from the engine: the request itself was malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 404 from the engine: the referenced process or task no longer
    /// exists, typically because a lock expired or the task was already
    /// resolved.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other error response; carries the engine's message verbatim.
    #[error("Unexpected engine error: {0}")]
    Unexpected(String),

    /// Network or connection-level failure, as opposed to a well-formed
    /// error response.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Remote engine gateway: the four operations the engine exposes to
/// external-task workers, one blocking request/response exchange each.
///
/// Implementations perform no retries and no backoff; every error is
/// returned to the immediate caller.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Start a process instance by process definition key. Fire and
    /// forget: a started instance has no further client-side lifecycle.
    async fn start_process(
        &self,
        process_id: &str,
        business_key: Option<&str>,
        variables: &VariableMap,
    ) -> Result<()>;

    /// Atomically claim up to `max_tasks` tasks across `topics` for
    /// `worker_id`. Returned definitions carry the worker id they were
    /// locked for.
    async fn fetch_and_lock(
        &self,
        worker_id: &str,
        max_tasks: u32,
        use_priority: bool,
        topics: &[Topic],
    ) -> Result<Vec<TaskDefinition>>;

    /// Report successful completion, with `variables` as the task's
    /// output (may be empty).
    async fn complete_task(
        &self,
        worker_id: &str,
        task_id: &str,
        variables: &VariableMap,
    ) -> Result<()>;

    /// Report a failed attempt. The engine decrements or sets retries and
    /// may re-offer the task after the report's retry timeout.
    async fn fail_task(
        &self,
        worker_id: &str,
        task_id: &str,
        report: &FailureReport,
    ) -> Result<()>;
}
