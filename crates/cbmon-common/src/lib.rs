//! Types shared between the cbmon collector library and the agent binary.

pub mod types;

/// Service marker written into the `hostHasService` dimension and the sink's
/// `plugin_name`.
pub const SERVICE_NAME: &str = "couchbase";

/// Every value read from the cluster API is reported as a gauge.
pub const METRIC_TYPE_GAUGE: &str = "gauge";
