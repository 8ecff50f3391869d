use cbmon_collector::client::ApiClient;
use cbmon_collector::config::TargetConfig;
use cbmon_collector::emit::{Emitter, MetricSink};
use cbmon_collector::{build_collector, poll_once, Collector};
use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};

/// Polls one target on its own timer.
pub struct TargetScheduler {
    config: Arc<TargetConfig>,
    collector: Box<dyn Collector>,
    emitter: Emitter,
}

impl TargetScheduler {
    pub fn new(config: Arc<TargetConfig>, client: Arc<dyn ApiClient>, sink: Arc<dyn MetricSink>) -> Self {
        let emitter = Emitter::new(sink, &config);
        let collector = build_collector(Arc::clone(&config), client);
        Self {
            config,
            collector,
            emitter,
        }
    }

    /// Runs one poll cycle, returning the number of emitted metrics.
    pub async fn poll(&self) -> usize {
        poll_once(self.collector.as_ref(), &self.emitter).await
    }

    /// Polls forever. A cycle that overruns the interval delays the next
    /// one instead of triggering a burst of catch-up polls.
    pub async fn run(self) {
        tracing::info!(
            target_name = self.collector.name(),
            interval_secs = self.config.interval_secs(),
            mode = %self.config.collect_mode,
            "Target scheduler started"
        );

        let mut tick = interval(self.config.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            let emitted = self.poll().await;
            tracing::debug!(target_name = self.collector.name(), emitted, "Poll cycle complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::JsonLineSink;
    use cbmon_collector::config::TargetSettings;
    use cbmon_collector::error::{CollectorError, Result};
    use serde_json::{json, Value};

    struct FixedClient;

    #[async_trait::async_trait]
    impl ApiClient for FixedClient {
        async fn get_json(&self, path: &str) -> Result<Value> {
            match path {
                "/pools/default" => Ok(json!({
                    "nodes": [
                        {"hostname": "a:8091", "thisNode": true, "interestingStats": {"ops": 4}},
                        {"hostname": "b:8091", "thisNode": false}
                    ],
                    "storageTotals": {"ram": {"total": 100}}
                })),
                _ => Err(CollectorError::Http {
                    path: path.to_string(),
                    status: 404,
                    body: String::new(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn should_poll_and_emit_once_per_cycle() {
        let config = TargetSettings {
            collect_target: Some("NODE".into()),
            host: Some("localhost".into()),
            port: Some(8091),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let sink = Arc::new(JsonLineSink::new(Vec::new()));
        let scheduler = TargetScheduler::new(Arc::new(config), Arc::new(FixedClient), sink);

        // storage.ram.total from the leader plus nodes.ops for the local node
        assert_eq!(scheduler.poll().await, 2);
        assert_eq!(scheduler.poll().await, 2);
    }
}
