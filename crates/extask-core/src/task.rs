use crate::VariableMap;
use serde::{Deserialize, Serialize};

/// One fetched unit of work, as returned by a fetch-and-lock exchange.
///
/// A definition is created by the gateway and never mutated afterwards;
/// completion and failure produce new outbound reports, not changes here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Unique task id, valid for the duration of the lock.
    pub id: String,

    /// The model activity this task was created from.
    #[serde(default)]
    pub activity_id: String,

    /// The execution the task belongs to.
    #[serde(default)]
    pub execution_id: String,

    /// Topic the task was fetched under.
    #[serde(default)]
    pub topic_name: String,

    /// Worker id the task is locked for. Stamped by the gateway from the
    /// fetch request; the engine expects the same id on every report.
    #[serde(default)]
    pub worker_id: String,

    /// Retries remaining before the engine marks the task permanently
    /// failed. Absent until the first failure report.
    #[serde(default)]
    pub retries: Option<i64>,

    /// Input variables visible to the task.
    #[serde(default)]
    pub variables: VariableMap,

    /// Error message from the most recent failed attempt, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Error details from the most recent failed attempt, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

/// Outbound failure report for one task.
///
/// Every field is optional; an empty report still tells the engine the
/// attempt failed. `retries` sets the remaining attempts, `retry_timeout_ms`
/// delays the task's next fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<i64>,

    #[serde(rename = "retryTimeout", skip_serializing_if = "Option::is_none")]
    pub retry_timeout_ms: Option<u64>,
}

impl FailureReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }

    pub fn retries(mut self, retries: i64) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn retry_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.retry_timeout_ms = Some(timeout_ms);
        self
    }
}
