use crate::catalog::{DEFAULT_METRICS, DETAILED_METRICS};
use cbmon_common::types::CollectMode;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Registry of flattened metric names that may become metrics.
///
/// `Default` mode admits only the default tier; `Detailed` admits either
/// tier. Lookups are exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use cbmon_collector::whitelist::Whitelist;
/// use cbmon_common::types::CollectMode;
///
/// let wl = Whitelist::from_tiers(&["nodes.ops"], &["nodes.uptime"]);
/// assert!(wl.is_allowed("nodes.ops", CollectMode::Default));
/// assert!(!wl.is_allowed("nodes.uptime", CollectMode::Default));
/// assert!(wl.is_allowed("nodes.uptime", CollectMode::Detailed));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    default: HashSet<String>,
    detailed: HashSet<String>,
}

impl Whitelist {
    pub fn from_tiers(default: &[&str], detailed: &[&str]) -> Self {
        Self {
            default: default.iter().map(|s| (*s).to_string()).collect(),
            detailed: detailed.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// The built-in catalog, built on first use and shared for the life of
    /// the process.
    pub fn builtin() -> &'static Whitelist {
        static BUILTIN: OnceLock<Whitelist> = OnceLock::new();
        BUILTIN.get_or_init(|| Whitelist::from_tiers(DEFAULT_METRICS, DETAILED_METRICS))
    }

    pub fn is_allowed(&self, name: &str, mode: CollectMode) -> bool {
        if self.default.contains(name) {
            return true;
        }
        mode == CollectMode::Detailed && self.detailed.contains(name)
    }

    /// Number of distinct names admitted in `mode`.
    pub fn len(&self, mode: CollectMode) -> usize {
        match mode {
            CollectMode::Default => self.default.len(),
            CollectMode::Detailed => self.default.union(&self.detailed).count(),
        }
    }
}
