use crate::error::{CollectorError, Result};
use cbmon_common::types::{Dimensions, TargetKind};
use cbmon_common::SERVICE_NAME;

pub const CLUSTER_DEFAULT: &str = "default";

/// Default width of the downstream tag field, brackets included.
pub const DEFAULT_FIELD_LENGTH: usize = 63;

/// Builds the base tag set of a target from an already parsed extra list.
///
/// User-supplied pairs are applied last and override the built-in keys.
pub fn base_dimensions(
    target: &TargetKind,
    cluster_name: &str,
    extra: &[(String, String)],
) -> Dimensions {
    let mut dims = Dimensions::new();
    dims.insert("hostHasService", SERVICE_NAME);
    let cluster = if cluster_name.is_empty() {
        CLUSTER_DEFAULT
    } else {
        cluster_name
    };
    dims.insert("cluster", cluster);
    if let Some(bucket) = target.bucket() {
        dims.insert("bucket", bucket);
    }
    for (key, value) in extra {
        dims.insert(key.as_str(), value.as_str());
    }
    dims
}

/// Builds the base tag set, parsing the raw `Dimensions` option.
///
/// # Errors
///
/// Returns [`CollectorError::Config`] if `extra_raw` is malformed.
pub fn build_dimensions(
    target: &TargetKind,
    cluster_name: &str,
    extra_raw: Option<&str>,
) -> Result<Dimensions> {
    let extra = match extra_raw {
        Some(raw) => parse_extra_dimensions(raw)?,
        None => Vec::new(),
    };
    Ok(base_dimensions(target, cluster_name, &extra))
}

/// Parses `key1=value1,key2=value2`.
///
/// Whitespace around pairs, keys and values is trimmed and empty segments
/// are skipped. Only the first `=` separates key from value.
///
/// # Errors
///
/// Returns [`CollectorError::Config`] for a segment without `=` or with an
/// empty key.
pub fn parse_extra_dimensions(raw: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (key, value) = segment.split_once('=').ok_or_else(|| {
            CollectorError::Config(format!(
                "malformed Dimensions entry '{segment}', expected key=value"
            ))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CollectorError::Config(format!(
                "malformed Dimensions entry '{segment}', key is empty"
            )));
        }
        pairs.push((key.to_string(), value.trim().to_string()));
    }
    Ok(pairs)
}

/// Renders `[k1=v1,k2=v2,...]` for the sink's tag field.
///
/// `node` comes first and `bucket` second when present, so the most
/// distinguishing tags survive truncation; the rest follow in key order.
/// The body is cut to `field_length - 2` characters before the brackets are
/// added.
///
/// # Examples
///
/// ```
/// use cbmon_collector::dimensions::format_dimensions;
/// use cbmon_common::types::Dimensions;
///
/// let dims: Dimensions = [("cluster", "c"), ("node", "n1")].into_iter().collect();
/// assert_eq!(format_dimensions(&dims, 63), "[node=n1,cluster=c]");
/// assert_eq!(format_dimensions(&dims, 6), "[node]");
/// ```
pub fn format_dimensions(dimensions: &Dimensions, field_length: usize) -> String {
    let mut pairs = Vec::with_capacity(dimensions.len());
    for key in ["node", "bucket"] {
        if let Some(value) = dimensions.get(key) {
            pairs.push(format!("{key}={value}"));
        }
    }
    pairs.extend(
        dimensions
            .iter()
            .filter(|(k, _)| *k != "node" && *k != "bucket")
            .map(|(k, v)| format!("{k}={v}")),
    );

    let budget = field_length.saturating_sub(2);
    let body: String = pairs.join(",").chars().take(budget).collect();
    format!("[{body}]")
}
