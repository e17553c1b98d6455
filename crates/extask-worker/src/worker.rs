use crate::handler::HandlerRegistry;
use crate::task::LockedTask;
use crate::{WorkerConfig, WorkerError};
use extask_client::EngineClient;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Polling worker: claims locked tasks for every registered topic and
/// dispatches each to its handler, one at a time.
pub struct Worker {
    config: WorkerConfig,
    worker_id: String,
    client: Arc<dyn EngineClient>,
    registry: Arc<HandlerRegistry>,
}

impl Worker {
    pub fn new(
        config: WorkerConfig,
        client: Arc<dyn EngineClient>,
        registry: HandlerRegistry,
    ) -> Self {
        let worker_id = config.resolve_worker_id();

        Worker {
            config,
            worker_id,
            client,
            registry: Arc::new(registry),
        }
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Run the fixed-delay poll loop until the first fatal error.
    ///
    /// Every fetch-and-lock failure is fatal: there is no way to tell a
    /// transient network hiccup from a permanent misconfiguration at this
    /// layer, so neither is retried. Handler failures are logged and never
    /// reach this path. Cancellation, if wanted, must wrap this future.
    pub async fn listen(&self) -> Result<(), WorkerError> {
        info!(
            "Worker {} listening ({} topic(s), poll interval {:?})",
            self.worker_id,
            self.registry.len(),
            self.config.poll_interval()
        );

        loop {
            self.poll().await?;
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// One fetch-dispatch cycle.
    async fn poll(&self) -> Result<(), WorkerError> {
        let topics = self.registry.topics();

        let tasks = self
            .client
            .fetch_and_lock(
                &self.worker_id,
                self.config.max_tasks,
                self.config.use_priority,
                &topics,
            )
            .await?;

        // Dispatch in response order, sequentially. A slow handler delays
        // the rest of the cycle and the next fetch.
        for definition in tasks {
            let handler = self
                .registry
                .handler_for(&definition.topic_name)
                .ok_or_else(|| WorkerError::MissingHandler(definition.topic_name.clone()))?;

            let task_id = definition.id.clone();
            let topic_name = definition.topic_name.clone();
            debug!("Dispatching task {} (topic {})", task_id, topic_name);

            let task = LockedTask::new(definition, self.client.clone());
            if let Err(err) = handler.handle(task).await {
                error!(
                    "Handler for topic {} failed on task {}: {:#}",
                    topic_name, task_id, err
                );
            }
        }

        Ok(())
    }
}
