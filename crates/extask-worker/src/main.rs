use clap::Parser;
use extask_client::RestEngineClient;
use extask_core::{Topic, VariableMap};
use extask_worker::{HandlerRegistry, LockedTask, TaskHandler, Worker, WorkerConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "extask-worker")]
#[command(about = "External task worker", long_about = None)]
struct Args {
    /// Engine base URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080/engine-rest")]
    engine: String,

    /// Worker ID (auto-generated if not provided)
    #[arg(long)]
    worker_id: Option<String>,

    /// Maximum tasks to claim per poll
    #[arg(short, long, default_value = "10")]
    max_tasks: u32,

    /// Poll interval in milliseconds
    #[arg(short, long, default_value = "5000")]
    poll_interval_ms: u64,

    /// Prefer higher-priority tasks when fetching
    #[arg(long)]
    use_priority: bool,

    /// Path to configuration file
    #[arg(long)]
    config: Option<String>,
}

/// Demo handler: acknowledges build tasks as soon as they arrive.
struct BuildHandler;

#[async_trait::async_trait]
impl TaskHandler for BuildHandler {
    async fn handle(&self, task: LockedTask) -> anyhow::Result<()> {
        tracing::info!(
            "Processing task {} (activity {})",
            task.id(),
            task.definition.activity_id
        );
        task.complete(VariableMap::new()).await?;
        tracing::info!("Completed task {}", task.id());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        WorkerConfig::from_file(config_path)?
    } else {
        WorkerConfig::default()
    };

    // Override with CLI args
    config.max_tasks = args.max_tasks;
    config.poll_interval_ms = args.poll_interval_ms;
    config.use_priority = args.use_priority;
    if let Some(worker_id) = args.worker_id {
        config.worker_id = Some(worker_id);
    }

    let registry = HandlerRegistry::new();
    registry.register(Topic::new("build", 5_000), BuildHandler)?;

    let client = Arc::new(RestEngineClient::new(args.engine));
    let worker = Worker::new(config, client, registry);

    // listen() only returns on a fatal fetch error; ctrl-c is the
    // external cancellation wrapped around it.
    tokio::select! {
        result = worker.listen() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Received shutdown signal"),
    }

    Ok(())
}
