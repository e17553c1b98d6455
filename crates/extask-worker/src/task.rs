use extask_client::{ClientError, EngineClient};
use extask_core::{FailureReport, TaskDefinition, VariableMap};
use std::sync::Arc;

/// A fetched task held under lock, bound to the gateway that fetched it.
///
/// Handlers receive one `LockedTask` per invocation and are expected to
/// resolve it within that invocation. Neither report is guarded against
/// repetition: a second `complete` or `fail` on the same task surfaces the
/// engine's own error for the duplicate report (typically not-found, once
/// the first report resolved the task).
pub struct LockedTask {
    pub definition: TaskDefinition,
    client: Arc<dyn EngineClient>,
}

impl LockedTask {
    pub fn new(definition: TaskDefinition, client: Arc<dyn EngineClient>) -> Self {
        LockedTask { definition, client }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn topic_name(&self) -> &str {
        &self.definition.topic_name
    }

    /// Report successful completion, with `variables` as the task's
    /// output (may be empty). A gateway error is returned as-is; there is
    /// no local retry.
    pub async fn complete(&self, variables: VariableMap) -> Result<(), ClientError> {
        self.client
            .complete_task(&self.definition.worker_id, &self.definition.id, &variables)
            .await
    }

    /// Send a single best-effort failure report. The engine decrements or
    /// sets retries and may re-offer the task after the report's retry
    /// timeout, or mark it permanently failed once retries run out.
    pub async fn fail(&self, report: FailureReport) -> Result<(), ClientError> {
        self.client
            .fail_task(&self.definition.worker_id, &self.definition.id, &report)
            .await
    }
}
