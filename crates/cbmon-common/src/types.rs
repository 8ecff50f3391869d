use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Which whitelist tier a target collects.
///
/// # Examples
///
/// ```
/// use cbmon_common::types::CollectMode;
///
/// let mode: CollectMode = "detailed".parse().unwrap();
/// assert_eq!(mode, CollectMode::Detailed);
/// assert_eq!(CollectMode::default().to_string(), "default");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectMode {
    #[default]
    Default,
    Detailed,
}

impl std::fmt::Display for CollectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectMode::Default => write!(f, "default"),
            CollectMode::Detailed => write!(f, "detailed"),
        }
    }
}

impl std::str::FromStr for CollectMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(CollectMode::Default),
            "detailed" => Ok(CollectMode::Detailed),
            _ => Err(format!("unknown collect mode: {s}")),
        }
    }
}

/// The scope a collector instance polls: the local cluster node, or one
/// named bucket on the local node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Node,
    Bucket(String),
}

impl TargetKind {
    pub fn bucket(&self) -> Option<&str> {
        match self {
            TargetKind::Node => None,
            TargetKind::Bucket(name) => Some(name.as_str()),
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Node => write!(f, "NODE"),
            TargetKind::Bucket(name) => write!(f, "BUCKET({name})"),
        }
    }
}

/// Tag set attached to a metric.
///
/// Keys are unique. The map is kept sorted so that every rendering of the
/// same set is identical; the `node`/`bucket`-first rule of the tag string is
/// applied by the formatter, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimensions {
    inner: BTreeMap<String, String>,
}

impl Dimensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tag, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.insert(key.into(), value.into())
    }

    /// Returns a copy of this set with one extra tag. The receiver is left
    /// untouched, so a base set can be reused across nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cbmon_common::types::Dimensions;
    ///
    /// let mut base = Dimensions::new();
    /// base.insert("cluster", "prod");
    /// let tagged = base.with("node", "10.0.0.1:8091");
    /// assert_eq!(tagged.get("node"), Some("10.0.0.1:8091"));
    /// assert_eq!(base.get("node"), None);
    /// ```
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.insert(key, value);
        copy
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Iterates tags in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dimensions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dims = Dimensions::new();
        for (k, v) in iter {
            dims.insert(k, v);
        }
        dims
    }
}

/// One flattened, whitelisted value read during a poll cycle.
///
/// Records produced by one flatten call share their dimension set.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub name: String,
    pub value: f64,
    pub dimensions: Arc<Dimensions>,
}

/// What the metric sink receives for each emitted [`MetricRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkRecord {
    pub plugin_name: String,
    pub metric_type: String,
    pub metric_name: String,
    /// Bracketed, length-capped dimension string, e.g. `[node=h1,cluster=c]`.
    pub tag_string: String,
    pub values: Vec<f64>,
    /// Poll interval of the emitting target, in seconds.
    pub interval: u64,
    pub collected_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_collect_mode_case_insensitively() {
        assert_eq!("DETAILED".parse::<CollectMode>(), Ok(CollectMode::Detailed));
        assert_eq!("default".parse::<CollectMode>(), Ok(CollectMode::Default));
        assert!("verbose".parse::<CollectMode>().is_err());
    }

    #[test]
    fn should_leave_base_dimensions_untouched_when_deriving() {
        let base: Dimensions = [("cluster", "c1"), ("hostHasService", "couchbase")]
            .into_iter()
            .collect();
        let first = base.with("node", "a");
        let second = base.with("node", "b");

        assert_eq!(base.len(), 2);
        assert_eq!(first.get("node"), Some("a"));
        assert_eq!(second.get("node"), Some("b"));
    }

    #[test]
    fn should_serialize_dimensions_as_plain_map() {
        let dims: Dimensions = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&dims).expect("dimensions should serialize");
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn should_report_bucket_name_only_for_bucket_targets() {
        assert_eq!(TargetKind::Node.bucket(), None);
        assert_eq!(TargetKind::Bucket("beer".into()).bucket(), Some("beer"));
        assert_eq!(TargetKind::Bucket("beer".into()).to_string(), "BUCKET(beer)");
    }
}
