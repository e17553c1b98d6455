//! In-crate fake gateway for worker tests: records every call and replays
//! scripted responses.

use async_trait::async_trait;
use extask_client::{ClientError, EngineClient};
use extask_core::{FailureReport, TaskDefinition, Topic, VariableMap};
use parking_lot::Mutex;
use std::collections::VecDeque;

pub(crate) fn definition(id: &str, topic_name: &str, worker_id: &str) -> TaskDefinition {
    TaskDefinition {
        id: id.to_string(),
        activity_id: String::new(),
        execution_id: String::new(),
        topic_name: topic_name.to_string(),
        worker_id: worker_id.to_string(),
        retries: None,
        variables: VariableMap::new(),
        error_message: None,
        error_details: None,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FetchCall {
    pub worker_id: String,
    pub max_tasks: u32,
    pub use_priority: bool,
    pub topics: Vec<Topic>,
}

/// Scripted responses are consumed in order; once a script runs dry the
/// fake answers with the benign default (empty fetch, Ok report).
pub(crate) struct RecordingClient {
    fetch_script: Mutex<VecDeque<Result<Vec<TaskDefinition>, ClientError>>>,
    complete_script: Mutex<VecDeque<Result<(), ClientError>>>,
    fail_script: Mutex<VecDeque<Result<(), ClientError>>>,

    pub fetches: Mutex<Vec<FetchCall>>,
    pub completes: Mutex<Vec<(String, String, VariableMap)>>,
    pub fails: Mutex<Vec<(String, String, FailureReport)>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        RecordingClient {
            fetch_script: Mutex::new(VecDeque::new()),
            complete_script: Mutex::new(VecDeque::new()),
            fail_script: Mutex::new(VecDeque::new()),
            fetches: Mutex::new(Vec::new()),
            completes: Mutex::new(Vec::new()),
            fails: Mutex::new(Vec::new()),
        }
    }

    pub fn push_fetch(&self, result: Result<Vec<TaskDefinition>, ClientError>) {
        self.fetch_script.lock().push_back(result);
    }

    pub fn push_complete(&self, result: Result<(), ClientError>) {
        self.complete_script.lock().push_back(result);
    }

    #[allow(dead_code)]
    pub fn push_fail(&self, result: Result<(), ClientError>) {
        self.fail_script.lock().push_back(result);
    }
}

#[async_trait]
impl EngineClient for RecordingClient {
    async fn start_process(
        &self,
        _process_id: &str,
        _business_key: Option<&str>,
        _variables: &VariableMap,
    ) -> Result<(), ClientError> {
        Ok(())
    }

    async fn fetch_and_lock(
        &self,
        worker_id: &str,
        max_tasks: u32,
        use_priority: bool,
        topics: &[Topic],
    ) -> Result<Vec<TaskDefinition>, ClientError> {
        self.fetches.lock().push(FetchCall {
            worker_id: worker_id.to_string(),
            max_tasks,
            use_priority,
            topics: topics.to_vec(),
        });

        match self.fetch_script.lock().pop_front() {
            Some(Ok(mut tasks)) => {
                // Same contract as the real gateway: returned definitions
                // carry the worker id they were locked for.
                for task in &mut tasks {
                    task.worker_id = worker_id.to_string();
                }
                Ok(tasks)
            }
            Some(Err(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }

    async fn complete_task(
        &self,
        worker_id: &str,
        task_id: &str,
        variables: &VariableMap,
    ) -> Result<(), ClientError> {
        self.completes.lock().push((
            worker_id.to_string(),
            task_id.to_string(),
            variables.clone(),
        ));
        self.complete_script.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn fail_task(
        &self,
        worker_id: &str,
        task_id: &str,
        report: &FailureReport,
    ) -> Result<(), ClientError> {
        self.fails.lock().push((
            worker_id.to_string(),
            task_id.to_string(),
            report.clone(),
        ));
        self.fail_script.lock().pop_front().unwrap_or(Ok(()))
    }
}
