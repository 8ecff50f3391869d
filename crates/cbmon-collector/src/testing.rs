//! Scripted API client, in-memory sink and canned cluster responses.

use crate::client::ApiClient;
use crate::emit::MetricSink;
use crate::error::{CollectorError, Result};
use cbmon_common::types::SinkRecord;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers each path from a fixed table; unknown paths fail with a 404.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    requests: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), body);
        self
    }

    pub fn fail(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ApiClient for MockClient {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(path.to_string());
        if let Some(status) = self.failures.get(path) {
            return Err(CollectorError::Http {
                path: path.to_string(),
                status: *status,
                body: String::new(),
            });
        }
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| CollectorError::Http {
                path: path.to_string(),
                status: 404,
                body: "Not Found".to_string(),
            })
    }
}

#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<SinkRecord>>,
    reject: Option<String>,
}

impl MemorySink {
    /// A sink that refuses records whose metric name equals `name`.
    pub fn rejecting(name: &str) -> Self {
        Self {
            records: Mutex::default(),
            reject: Some(name.to_string()),
        }
    }

    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl MetricSink for MemorySink {
    fn emit(&self, record: SinkRecord) -> anyhow::Result<()> {
        if self.reject.as_deref() == Some(record.metric_name.as_str()) {
            anyhow::bail!("sink refused {}", record.metric_name);
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

/// A `/pools/default` body listing `hosts` as `(hostname, thisNode)`.
pub fn node_list(hosts: &[(&str, bool)]) -> Value {
    let nodes: Vec<Value> = hosts
        .iter()
        .map(|(hostname, this_node)| {
            json!({
                "systemStats": {
                    "cpu_utilization_rate": 3.25,
                    "swap_total": 4_294_967_296_u64,
                    "swap_used": 0,
                    "mem_total": 8_589_934_592_u64,
                    "mem_free": 4_294_967_296_u64
                },
                "interestingStats": {
                    "cmd_get": 12,
                    "couch_docs_actual_disk_size": 1_048_576,
                    "curr_items": 7303,
                    "get_hits": 10,
                    "mem_used": 52_428_800,
                    "ops": 14
                },
                "uptime": "6036",
                "memoryTotal": 8_589_934_592_u64,
                "memoryFree": 4_294_967_296_u64,
                "mcdMemoryReserved": 6553,
                "mcdMemoryAllocated": 6553,
                "clusterMembership": "active",
                "status": "healthy",
                "thisNode": this_node,
                "hostname": hostname,
                "version": "7.2.0-5325-enterprise",
                "ports": {"direct": 11210, "httpsMgmt": 18091},
                "services": ["index", "kv", "n1ql"]
            })
        })
        .collect();

    json!({
        "name": "default",
        "nodes": nodes,
        "storageTotals": {
            "ram": {
                "total": 8_589_934_592_u64,
                "quotaTotal": 1_073_741_824,
                "quotaUsed": 104_857_600,
                "used": 7_516_192_768_u64,
                "usedByData": 52_428_800,
                "quotaUsedPerNode": 104_857_600,
                "quotaTotalPerNode": 1_073_741_824
            },
            "hdd": {
                "total": 107_374_182_400_u64,
                "quotaTotal": 107_374_182_400_u64,
                "used": 21_474_836_480_u64,
                "usedByData": 1_048_576,
                "free": 85_899_345_920_u64
            }
        }
    })
}

/// A `/pools/default/buckets/<b>` body.
pub fn bucket_details() -> Value {
    json!({
        "name": "default",
        "bucketType": "membase",
        "quota": {"ram": 104_857_600, "rawRAM": 104_857_600},
        "basicStats": {
            "quotaPercentUsed": 12.5,
            "opsPerSec": 0,
            "diskFetches": 0,
            "itemCount": 7303,
            "diskUsed": 1_048_576,
            "dataUsed": 524_288,
            "memUsed": 13_107_200,
            "vbActiveNumNonResident": 0
        },
        "nodes": []
    })
}

/// Stats path the membership fixture advertises for `hostname`.
pub fn stats_path(bucket: &str, hostname: &str) -> String {
    format!(
        "/pools/default/buckets/{bucket}/nodes/{}/stats",
        hostname.replace(':', "%3A")
    )
}

/// A `/pools/default/buckets/<b>/nodes` body.
pub fn bucket_nodes(bucket: &str, hosts: &[&str]) -> Value {
    let servers: Vec<Value> = hosts
        .iter()
        .map(|hostname| {
            json!({
                "hostname": hostname,
                "uri": format!("/pools/default/buckets/{bucket}/nodes/{hostname}"),
                "stats": {"uri": stats_path(bucket, hostname)}
            })
        })
        .collect();
    json!({ "servers": servers })
}

/// A per-node bucket stats body with the given `op.samples`.
pub fn bucket_stats(samples: Value) -> Value {
    json!({
        "hostname": "ignored",
        "op": {
            "samples": samples,
            "samplesCount": 60,
            "isPersistent": true,
            "lastTStamp": 1_513_786_800_000_u64,
            "interval": 1000
        }
    })
}
