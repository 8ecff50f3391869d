use crate::client::{bucket_nodes_path, bucket_path, ApiClient, NODE_LIST_PATH};
use crate::config::TargetConfig;
use crate::error::{CollectorError, Result};
use crate::flatten::{flatten, flatten_samples};
use crate::leader::{resolve_response, Leadership};
use crate::whitelist::Whitelist;
use crate::{fetch_logged, Collector};
use cbmon_common::types::{Dimensions, MetricRecord};
use serde_json::Value;
use std::sync::Arc;

/// Sections of the bucket details response and the prefix each is reported
/// under.
const BUCKET_SECTIONS: &[(&str, &str)] = &[("quota", "bucket.quota"), ("basicStats", "bucket.basic")];

/// Collects one bucket's statistics.
///
/// Each cycle reads the node list to find the local node and leadership. The
/// leader reports the bucket-wide `quota` and `basicStats`; every instance
/// reports the local node's `op.samples` for the bucket.
pub struct BucketCollector {
    label: String,
    bucket: String,
    config: Arc<TargetConfig>,
    client: Arc<dyn ApiClient>,
    whitelist: &'static Whitelist,
}

impl BucketCollector {
    pub fn new(config: Arc<TargetConfig>, client: Arc<dyn ApiClient>) -> Self {
        Self {
            label: config.label(),
            bucket: config.target.bucket().unwrap_or_default().to_string(),
            config,
            client,
            whitelist: Whitelist::builtin(),
        }
    }

    async fn leadership(&self) -> Leadership {
        let Some(response) = fetch_logged(self.client.as_ref(), &self.label, NODE_LIST_PATH).await else {
            return Leadership::default();
        };
        match resolve_response(&response) {
            Ok(leadership) => leadership,
            Err(e) => {
                tracing::warn!(target_name = %self.label, error = %e, "Unusable node list response");
                Leadership::default()
            }
        }
    }

    async fn bucket_metrics(&self, base: &Arc<Dimensions>) -> Vec<MetricRecord> {
        let path = bucket_path(&self.bucket);
        let Some(response) = fetch_logged(self.client.as_ref(), &self.label, &path).await else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for (key, prefix) in BUCKET_SECTIONS {
            match response.get(*key).and_then(Value::as_object) {
                Some(section) => records.extend(flatten(prefix, section, base, self.config.collect_mode, self.whitelist)),
                None => tracing::warn!(target_name = %self.label, section = *key, "Bucket details lack section"),
            }
        }
        records
    }

    /// Reads the membership list and then the local node's stats for the
    /// bucket.
    async fn node_metrics(&self, hostname: &str, base: &Dimensions) -> Result<Vec<MetricRecord>> {
        let membership = self.client.get_json(&bucket_nodes_path(&self.bucket)).await?;
        let uri = stats_uri(&membership, hostname)?;
        let stats = self.client.get_json(uri).await?;
        let samples = stats
            .get("op")
            .and_then(|op| op.get("samples"))
            .and_then(Value::as_object)
            .ok_or_else(|| CollectorError::missing("op.samples"))?;

        let dims = Arc::new(base.with("node", hostname));
        Ok(flatten_samples("bucket.op", samples, &dims, self.config.collect_mode, self.whitelist))
    }
}

/// The `stats.uri` of the server named `hostname` in a membership response.
fn stats_uri<'a>(membership: &'a Value, hostname: &str) -> Result<&'a str> {
    let servers = membership
        .get("servers")
        .and_then(Value::as_array)
        .ok_or_else(|| CollectorError::missing("servers"))?;
    let server = servers
        .iter()
        .find(|s| s.get("hostname").and_then(Value::as_str) == Some(hostname))
        .ok_or_else(|| CollectorError::missing(&format!("servers[hostname={hostname}]")))?;
    server
        .get("stats")
        .and_then(|stats| stats.get("uri"))
        .and_then(Value::as_str)
        .ok_or_else(|| CollectorError::missing("servers[].stats.uri"))
}

#[async_trait::async_trait]
impl Collector for BucketCollector {
    fn name(&self) -> &str {
        &self.label
    }

    async fn collect(&self) -> Vec<MetricRecord> {
        let leadership = self.leadership().await;
        let base = Arc::new(self.config.base_dimensions());
        let mut records = Vec::new();

        if leadership.is_leader {
            records.extend(self.bucket_metrics(&base).await);
        }

        match leadership.current {
            Some(hostname) => match self.node_metrics(&hostname, &base).await {
                Ok(node_records) => records.extend(node_records),
                Err(e) => tracing::warn!(
                    target_name = %self.label,
                    node = %hostname,
                    error = %e,
                    "Skipping per-node bucket statistics this cycle"
                ),
            },
            None => tracing::warn!(target_name = %self.label, "Local node unknown, skipping per-node bucket statistics"),
        }

        tracing::debug!(
            target_name = %self.label,
            leader = leadership.is_leader,
            count = records.len(),
            "Collected bucket metrics"
        );
        records
    }
}
