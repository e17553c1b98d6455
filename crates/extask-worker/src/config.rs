use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Worker pool configuration, immutable for the worker's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Worker identity reported to the engine. Auto-generated when unset.
    pub worker_id: Option<String>,

    /// Upper bound on tasks claimed per poll cycle.
    pub max_tasks: u32,

    /// Ask the engine to hand out higher-priority tasks first.
    pub use_priority: bool,

    /// Fixed delay between poll cycles, in milliseconds. A slow cycle
    /// pushes the next one back by its own duration.
    pub poll_interval_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            worker_id: None,
            max_tasks: 10,
            use_priority: false,
            poll_interval_ms: 5_000,
        }
    }
}

impl WorkerConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: WorkerConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The configured id when present, otherwise hostname-pid-random.
    pub fn resolve_worker_id(&self) -> String {
        use uuid::Uuid;

        if let Some(id) = &self.worker_id {
            return id.clone();
        }

        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string());

        let pid = std::process::id();
        let random = Uuid::new_v4().to_string().split('-').next().unwrap().to_string();

        format!("{}-{}-{}", hostname, pid, random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_worker_id_wins() {
        let config = WorkerConfig {
            worker_id: Some("worker-7".to_string()),
            ..Default::default()
        };

        assert_eq!(config.resolve_worker_id(), "worker-7");
    }

    #[test]
    fn test_generated_worker_id_has_three_parts() {
        let config = WorkerConfig::default();
        let id = config.resolve_worker_id();

        assert!(id.split('-').count() >= 3, "unexpected id shape: {}", id);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config: WorkerConfig =
            serde_yaml::from_str("worker_id: w1\nmax_tasks: 3\n").unwrap();

        assert_eq!(config.worker_id.as_deref(), Some("w1"));
        assert_eq!(config.max_tasks, 3);
        assert!(!config.use_priority);
        assert_eq!(config.poll_interval(), Duration::from_millis(5_000));
    }
}
