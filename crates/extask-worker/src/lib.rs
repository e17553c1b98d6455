pub mod config;
pub mod handler;
pub mod task;
pub mod worker;

pub use config::WorkerConfig;
pub use handler::{HandlerRegistry, TaskHandler};
pub use task::LockedTask;
pub use worker::Worker;

use extask_client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    /// A topic can carry at most one handler; the existing registration
    /// stays active.
    #[error("Handler already registered for topic: {0}")]
    AlreadyRegistered(String),

    /// The engine returned a task for a topic absent from the registry.
    /// Fetch requests only name registered topics, so this is an
    /// invariant violation, never a routine condition.
    #[error("No handler registered for fetched topic: {0}")]
    MissingHandler(String),

    /// A fetch-and-lock exchange failed; fatal to the poll loop.
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, WorkerError>;

#[cfg(test)]
pub(crate) mod testing;
