use crate::task::LockedTask;
use crate::WorkerError;
use async_trait::async_trait;
use extask_core::Topic;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Business logic for one topic.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Process one locked task. The handler owns the task's lifecycle and
    /// reports the outcome through [`LockedTask::complete`] or
    /// [`LockedTask::fail`]; a returned error is logged by the worker and
    /// goes no further.
    async fn handle(&self, task: LockedTask) -> anyhow::Result<()>;
}

struct Registration {
    topic: Topic,
    handler: Arc<dyn TaskHandler>,
}

/// Topic-keyed handler registry, at most one handler per topic.
///
/// Registration normally happens once during setup, but the map is
/// lock-guarded so registering while a worker polls is safe.
pub struct HandlerRegistry {
    handlers: Mutex<HashMap<String, Registration>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        HandlerRegistry {
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Register `handler` for `topic`. Fails when the topic name is
    /// already taken; the existing registration is left untouched.
    pub fn register<H: TaskHandler + 'static>(
        &self,
        topic: Topic,
        handler: H,
    ) -> Result<(), WorkerError> {
        let mut handlers = self.handlers.lock();

        if handlers.contains_key(&topic.name) {
            return Err(WorkerError::AlreadyRegistered(topic.name));
        }

        handlers.insert(
            topic.name.clone(),
            Registration {
                topic,
                handler: Arc::new(handler),
            },
        );

        Ok(())
    }

    /// Get the handler registered for a topic name.
    pub fn handler_for(&self, topic_name: &str) -> Option<Arc<dyn TaskHandler>> {
        self.handlers.lock().get(topic_name).map(|r| r.handler.clone())
    }

    /// All registered topics, for building fetch-and-lock requests.
    pub fn topics(&self) -> Vec<Topic> {
        self.handlers.lock().values().map(|r| r.topic.clone()).collect()
    }

    /// Number of registered topics.
    pub fn len(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
