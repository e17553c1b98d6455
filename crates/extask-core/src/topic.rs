use serde::{Deserialize, Serialize};

/// A class of external work, identified by name.
///
/// Each topic carries the lock duration granted to tasks fetched under it
/// and optional process-definition scoping. Immutable once registered with
/// a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique topic name, the routing key between engine and handlers.
    #[serde(rename = "topicName")]
    pub name: String,

    /// How long a fetched task stays exclusively held, in milliseconds.
    #[serde(rename = "lockDuration")]
    pub lock_duration_ms: u64,

    /// Restrict fetching to one process definition by id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_definition_id: Option<String>,

    /// Restrict fetching to one process definition by key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_definition_key: Option<String>,
}

impl Topic {
    pub fn new(name: impl Into<String>, lock_duration_ms: u64) -> Self {
        Topic {
            name: name.into(),
            lock_duration_ms,
            process_definition_id: None,
            process_definition_key: None,
        }
    }

    pub fn process_definition_id(mut self, id: impl Into<String>) -> Self {
        self.process_definition_id = Some(id.into());
        self
    }

    pub fn process_definition_key(mut self, key: impl Into<String>) -> Self {
        self.process_definition_key = Some(key.into());
        self
    }
}
