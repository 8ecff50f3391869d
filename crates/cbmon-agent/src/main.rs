mod config;
mod scheduler;
mod sink;

use anyhow::Result;
use cbmon_collector::client::{ApiClient, RestClient};
use cbmon_collector::emit::MetricSink;
use scheduler::TargetScheduler;
use sink::JsonLineSink;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/agent.toml".to_string());
    let config = config::AgentConfig::load(&config_path)?;

    // stdout carries the metric stream
    let filter = config
        .log_directives()?
        .into_iter()
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let targets = config.resolve_targets()?;
    tracing::info!(config = %config_path, targets = targets.len(), "cbmon-agent starting");

    let sink: Arc<dyn MetricSink> = Arc::new(JsonLineSink::stdout());

    // Build every client before the first poll so a bad target stops startup.
    let mut schedulers = Vec::with_capacity(targets.len());
    for target in targets {
        let client: Arc<dyn ApiClient> = Arc::new(RestClient::new(&target)?);
        tracing::info!(
            target_name = %target.label(),
            mode = %target.collect_mode,
            interval_secs = target.interval_secs(),
            cluster = %target.cluster_name,
            credentials = ?target.credentials,
            "Target configured"
        );
        schedulers.push(TargetScheduler::new(Arc::new(target), client, Arc::clone(&sink)));
    }

    let handles: Vec<_> = schedulers
        .into_iter()
        .map(|scheduler| tokio::spawn(scheduler.run()))
        .collect();

    signal::ctrl_c().await?;
    tracing::info!("Shutting down gracefully");
    for handle in handles {
        handle.abort();
    }

    Ok(())
}
