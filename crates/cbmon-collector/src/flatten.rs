use crate::whitelist::Whitelist;
use cbmon_common::types::{CollectMode, Dimensions, MetricRecord};
use serde_json::{Map, Value};
use std::sync::Arc;

/// How a nested object's key contributes to its children's metric names.
enum PrefixRule {
    /// Append `.` plus a fixed segment instead of the key.
    Segment(&'static str),
    /// Flatten the children in place, adding nothing.
    Inline,
}

/// Keys whose object children are not named after the key itself. Every
/// other key appends `.` + key.
const PREFIX_RULES: &[(&str, PrefixRule)] = &[
    ("systemStats", PrefixRule::Segment("system")),
    ("interestingStats", PrefixRule::Inline),
];

fn child_prefix(prefix: &str, key: &str) -> String {
    let rule = PREFIX_RULES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rule)| rule);
    match rule {
        Some(PrefixRule::Inline) => prefix.to_string(),
        Some(PrefixRule::Segment(segment)) => format!("{prefix}.{segment}"),
        None => format!("{prefix}.{key}"),
    }
}

/// Walks `object` and returns one record for every whitelisted scalar leaf.
///
/// A leaf under key `k` is named `prefix.k`; nested objects extend the
/// prefix (`systemStats` becomes `.system`, `interestingStats` adds
/// nothing). Arrays are leaves, and since no whitelisted name refers to one
/// they are dropped. All records share `dimensions`.
///
/// # Examples
///
/// ```
/// use cbmon_collector::flatten::flatten;
/// use cbmon_collector::whitelist::Whitelist;
/// use cbmon_common::types::{CollectMode, Dimensions};
/// use std::sync::Arc;
///
/// let wl = Whitelist::from_tiers(&["nodes.system.mem_free"], &[]);
/// let doc = serde_json::json!({"systemStats": {"mem_free": 512, "mem_total": 1024}});
/// let dims = Arc::new(Dimensions::new());
/// let records = flatten("nodes", doc.as_object().unwrap(), &dims, CollectMode::Default, &wl);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name, "nodes.system.mem_free");
/// ```
pub fn flatten(
    prefix: &str,
    object: &Map<String, Value>,
    dimensions: &Arc<Dimensions>,
    mode: CollectMode,
    whitelist: &Whitelist,
) -> Vec<MetricRecord> {
    let mut records = Vec::new();
    flatten_into(prefix, object, dimensions, mode, whitelist, &mut records);
    records
}

fn flatten_into(
    prefix: &str,
    object: &Map<String, Value>,
    dimensions: &Arc<Dimensions>,
    mode: CollectMode,
    whitelist: &Whitelist,
    records: &mut Vec<MetricRecord>,
) {
    for (key, value) in object {
        match value {
            Value::Object(child) => {
                let next = child_prefix(prefix, key);
                flatten_into(&next, child, dimensions, mode, whitelist, records);
            }
            _ => {
                if let Some(record) = leaf_record(prefix, key, value, dimensions, mode, whitelist) {
                    records.push(record);
                }
            }
        }
    }
}

/// Flattens a `stat -> [samples...]` map, taking the newest (last) sample of
/// each series as its current value.
///
/// Entries that are not arrays, or are empty, are skipped.
pub fn flatten_samples(
    prefix: &str,
    samples: &Map<String, Value>,
    dimensions: &Arc<Dimensions>,
    mode: CollectMode,
    whitelist: &Whitelist,
) -> Vec<MetricRecord> {
    samples
        .iter()
        .filter_map(|(stat, series)| {
            let last = series.as_array()?.last()?;
            leaf_record(prefix, stat, last, dimensions, mode, whitelist)
        })
        .collect()
}

fn leaf_record(
    prefix: &str,
    key: &str,
    value: &Value,
    dimensions: &Arc<Dimensions>,
    mode: CollectMode,
    whitelist: &Whitelist,
) -> Option<MetricRecord> {
    let name = format!("{prefix}.{key}");
    if !whitelist.is_allowed(&name, mode) {
        return None;
    }
    let Some(value) = numeric_value(value) else {
        tracing::debug!(metric = %name, "Skipping non-numeric whitelisted value");
        return None;
    };
    Some(MetricRecord {
        name,
        value,
        dimensions: Arc::clone(dimensions),
    })
}

/// Reads a gauge value. Booleans become `1`/`0`; the API reports a few
/// counters (e.g. `uptime`) as decimal strings.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn whitelist() -> Whitelist {
        Whitelist::from_tiers(
            &[
                "nodes.system.cpu_utilization_rate",
                "nodes.cmd_get",
                "nodes.memoryTotal",
                "storage.ram.total",
                "storage.hdd.free",
                "bucket.op.get_hits",
            ],
            &["nodes.uptime", "nodes.healthy", "nodes.ports.direct"],
        )
    }

    fn names(records: &[MetricRecord]) -> BTreeMap<String, f64> {
        records.iter().map(|r| (r.name.clone(), r.value)).collect()
    }

    fn object(value: &Value) -> &Map<String, Value> {
        value.as_object().expect("fixture should be an object")
    }

    #[test]
    fn should_apply_special_prefix_rules() {
        let doc = json!({
            "systemStats": {"cpu_utilization_rate": 12.5},
            "interestingStats": {"cmd_get": 7},
            "memoryTotal": 2048
        });
        let dims = Arc::new(Dimensions::new());
        let records = flatten("nodes", object(&doc), &dims, CollectMode::Default, &whitelist());

        let got = names(&records);
        assert_eq!(got.len(), 3);
        assert_eq!(got["nodes.system.cpu_utilization_rate"], 12.5);
        assert_eq!(got["nodes.cmd_get"], 7.0);
        assert_eq!(got["nodes.memoryTotal"], 2048.0);
    }

    #[test]
    fn should_append_key_segment_for_ordinary_nested_objects() {
        let doc = testing::node_list(&[("a:8091", true)]);
        let totals = &doc["storageTotals"];
        let dims = Arc::new(Dimensions::new());
        let got = names(&flatten("storage", object(totals), &dims, CollectMode::Default, &whitelist()));
        assert!(got.contains_key("storage.ram.total"));
        assert!(got.contains_key("storage.hdd.free"));
        assert!(!got.contains_key("storage.ram.used"));
    }

    #[test]
    fn should_drop_detailed_names_in_default_mode() {
        let doc = json!({"uptime": "6036", "cmd_get": 1});
        let dims = Arc::new(Dimensions::new());

        let default = names(&flatten("nodes", object(&doc), &dims, CollectMode::Default, &whitelist()));
        assert!(!default.contains_key("nodes.uptime"));

        let detailed = names(&flatten("nodes", object(&doc), &dims, CollectMode::Detailed, &whitelist()));
        assert_eq!(detailed["nodes.uptime"], 6036.0);
    }

    #[test]
    fn should_coerce_booleans_and_skip_non_numeric_values() {
        let doc = json!({
            "healthy": true,
            "uptime": "not-a-number",
            "hostname": "a:8091",
            "ports": {"direct": null}
        });
        let dims = Arc::new(Dimensions::new());
        let got = names(&flatten("nodes", object(&doc), &dims, CollectMode::Detailed, &whitelist()));
        assert_eq!(got.len(), 1);
        assert_eq!(got["nodes.healthy"], 1.0);
    }

    #[test]
    fn should_not_recurse_into_lists() {
        let doc = json!({"services": [{"cmd_get": 3}], "cmd_get": [1, 2]});
        let dims = Arc::new(Dimensions::new());
        assert!(flatten("nodes", object(&doc), &dims, CollectMode::Detailed, &whitelist()).is_empty());
    }

    #[test]
    fn should_be_deterministic_for_same_input() {
        let doc = testing::node_list(&[("b:8091", false), ("a:8091", true)]);
        let node = &doc["nodes"][1];
        let dims = Arc::new(Dimensions::new());
        let wl = Whitelist::builtin();
        let first = names(&flatten("nodes", object(node), &dims, CollectMode::Detailed, wl));
        let second = names(&flatten("nodes", object(node), &dims, CollectMode::Detailed, wl));
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn should_share_dimensions_between_records() {
        let doc = json!({"cmd_get": 1, "memoryTotal": 2});
        let dims = Arc::new(Dimensions::new().with("node", "a"));
        let records = flatten("nodes", object(&doc), &dims, CollectMode::Default, &whitelist());
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| Arc::ptr_eq(&r.dimensions, &dims)));
    }

    #[test]
    fn should_take_last_sample_of_each_series() {
        let samples = json!({"get_hits": [1, 2, 3], "cmd_set": [4, 5]});
        let dims = Arc::new(Dimensions::new());
        let records = flatten_samples("bucket.op", object(&samples), &dims, CollectMode::Default, &whitelist());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "bucket.op.get_hits");
        assert_eq!(records[0].value, 3.0);
    }

    #[test]
    fn should_skip_empty_and_scalar_sample_entries() {
        let samples = json!({"get_hits": [], "timestamp": 12});
        let dims = Arc::new(Dimensions::new());
        let wl = Whitelist::from_tiers(&["bucket.op.get_hits", "bucket.op.timestamp"], &[]);
        assert!(flatten_samples("bucket.op", object(&samples), &dims, CollectMode::Default, &wl).is_empty());
    }

    #[test]
    fn should_read_numeric_values() {
        assert_eq!(numeric_value(&json!(3)), Some(3.0));
        assert_eq!(numeric_value(&json!(false)), Some(0.0));
        assert_eq!(numeric_value(&json!(" 42.5 ")), Some(42.5));
        assert_eq!(numeric_value(&json!("NaN")), None);
        assert_eq!(numeric_value(&json!(null)), None);
        assert_eq!(numeric_value(&json!({"a": 1})), None);
    }
}
