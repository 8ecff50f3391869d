use crate::client::{ApiClient, NODE_LIST_PATH};
use crate::config::TargetConfig;
use crate::flatten::flatten;
use crate::leader::{parse_nodes, resolve};
use crate::whitelist::Whitelist;
use crate::{fetch_logged, Collector};
use cbmon_common::types::MetricRecord;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Collects statistics of the local cluster node from `/pools/default`.
///
/// The leader additionally reports the cluster's `storageTotals`.
pub struct NodeCollector {
    label: String,
    config: Arc<TargetConfig>,
    client: Arc<dyn ApiClient>,
    whitelist: &'static Whitelist,
}

impl NodeCollector {
    pub fn new(config: Arc<TargetConfig>, client: Arc<dyn ApiClient>) -> Self {
        Self {
            label: config.label(),
            config,
            client,
            whitelist: Whitelist::builtin(),
        }
    }
}

/// The entry of `nodes` whose hostname is `hostname`.
fn node_entry<'a>(response: &'a Value, hostname: &str) -> Option<&'a Map<String, Value>> {
    response
        .get("nodes")?
        .as_array()?
        .iter()
        .find(|node| node.get("hostname").and_then(Value::as_str) == Some(hostname))?
        .as_object()
}

#[async_trait::async_trait]
impl Collector for NodeCollector {
    fn name(&self) -> &str {
        &self.label
    }

    async fn collect(&self) -> Vec<MetricRecord> {
        let Some(response) = fetch_logged(self.client.as_ref(), &self.label, NODE_LIST_PATH).await else {
            return Vec::new();
        };
        let nodes = match parse_nodes(&response) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!(target_name = %self.label, error = %e, "Unusable node list response");
                return Vec::new();
            }
        };

        let leadership = resolve(&nodes);
        let mode = self.config.collect_mode;
        let base = Arc::new(self.config.base_dimensions());
        let mut records = Vec::new();

        if leadership.is_leader {
            match response.get("storageTotals").and_then(Value::as_object) {
                Some(totals) => records.extend(flatten("storage", totals, &base, mode, self.whitelist)),
                None => tracing::warn!(target_name = %self.label, "Node list has no storageTotals"),
            }
        }

        if let Some(hostname) = leadership.current {
            if let Some(node) = node_entry(&response, &hostname) {
                let dims = Arc::new(base.with("node", hostname.as_str()));
                records.extend(flatten("nodes", node, &dims, mode, self.whitelist));
            }
        }

        tracing::debug!(
            target_name = %self.label,
            leader = leadership.is_leader,
            count = records.len(),
            "Collected node metrics"
        );
        records
    }
}
