//! Metric collection for Couchbase clusters.
//!
//! Each [`Collector`] implementation polls one configured target (the local
//! cluster node, or one bucket on it) through the administrative REST API,
//! flattens the JSON it gets back into whitelisted [`MetricRecord`]s and
//! returns them for emission. Cluster-wide statistics are only collected by
//! the leader instance (see [`leader`]).

pub mod bucket;
pub mod catalog;
pub mod client;
pub mod config;
pub mod dimensions;
pub mod emit;
pub mod error;
pub mod flatten;
pub mod leader;
pub mod node;
pub mod whitelist;

#[cfg(test)]
pub(crate) mod testing;

use crate::bucket::BucketCollector;
use crate::client::ApiClient;
use crate::config::TargetConfig;
use crate::emit::Emitter;
use crate::node::NodeCollector;
use cbmon_common::types::{MetricRecord, TargetKind};
use serde_json::Value;
use std::sync::Arc;

/// A collector for one configured target.
///
/// `collect` runs one poll cycle. A failed request only drops the metrics
/// it would have produced, so the call itself cannot fail.
#[async_trait::async_trait]
pub trait Collector: Send + Sync {
    /// Returns a label for logging, e.g. `"BUCKET(beer)@db1:8091"`.
    fn name(&self) -> &str;

    async fn collect(&self) -> Vec<MetricRecord>;
}

/// Builds the collector matching the target kind of `config`.
pub fn build_collector(config: Arc<TargetConfig>, client: Arc<dyn ApiClient>) -> Box<dyn Collector> {
    match config.target {
        TargetKind::Node => Box::new(NodeCollector::new(config, client)),
        TargetKind::Bucket(_) => Box::new(BucketCollector::new(config, client)),
    }
}

/// Runs one poll cycle and emits the result. Returns the number of metrics
/// the sink accepted.
pub async fn poll_once(collector: &dyn Collector, emitter: &Emitter) -> usize {
    let records = collector.collect().await;
    let emitted = emitter.emit_all(&records);
    tracing::debug!(target_name = collector.name(), collected = records.len(), emitted, "Poll cycle finished");
    emitted
}

/// GETs `path`, logging and swallowing any failure.
pub(crate) async fn fetch_logged(client: &dyn ApiClient, target: &str, path: &str) -> Option<Value> {
    match client.get_json(path).await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(target_name = target, path, error = %e, "API request failed, skipping its metrics this cycle");
            None
        }
    }
}
