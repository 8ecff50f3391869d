use crate::dimensions::{build_dimensions, CLUSTER_DEFAULT, DEFAULT_FIELD_LENGTH};
use crate::error::{CollectorError, Result};
use cbmon_common::types::{CollectMode, Dimensions, TargetKind};
use serde::Deserialize;
use std::time::Duration;

fn default_interval() -> u64 {
    10
}

fn default_timeout() -> u64 {
    60
}

/// Raw options of one collection target, as written in the config file.
///
/// Every field is optional here so that a missing required option is
/// reported as a configuration error by [`TargetSettings::resolve`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetSettings {
    /// `NODE` or `BUCKET`.
    pub collect_target: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Required when `collect_target` is `BUCKET`.
    pub collect_bucket: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Poll interval in seconds.
    pub interval: Option<u64>,
    /// `default` or `detailed`.
    pub collect_mode: Option<String>,
    pub cluster_name: Option<String>,
    /// Extra tags, `key=value` pairs separated by commas.
    pub dimensions: Option<String>,
    pub field_length: Option<usize>,
    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CollectorError::Config(format!("Missing required config setting: {key}"))),
    }
}

impl TargetSettings {
    /// Validates the options and fills in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Config`] for a missing `CollectTarget`,
    /// `Host` or `Port`, an unsupported `CollectTarget`, a `BUCKET` target
    /// without `CollectBucket`, an unknown `CollectMode`, a zero `Interval`
    /// or `Timeout`, a `FieldLength` below 2, or a malformed `Dimensions`.
    pub fn resolve(&self) -> Result<TargetConfig> {
        let collect_target = required(&self.collect_target, "CollectTarget")?;
        let host = required(&self.host, "Host")?.to_string();
        let port = match self.port {
            Some(p) if p > 0 => p,
            Some(_) => return Err(CollectorError::Config("Port must be non-zero".to_string())),
            None => {
                return Err(CollectorError::Config(
                    "Missing required config setting: Port".to_string(),
                ))
            }
        };

        let target = match collect_target {
            "NODE" => TargetKind::Node,
            "BUCKET" => TargetKind::Bucket(
                required(&self.collect_bucket, "CollectBucket")
                    .map_err(|_| {
                        CollectorError::Config(
                            "Missing required config setting for bucket CollectBucket".to_string(),
                        )
                    })?
                    .to_string(),
            ),
            other => {
                return Err(CollectorError::Config(format!(
                    "Unsupported CollectTarget value: {other}"
                )))
            }
        };

        let collect_mode = match self.collect_mode.as_deref() {
            Some(mode) if !mode.trim().is_empty() => {
                mode.trim().parse::<CollectMode>().map_err(CollectorError::Config)?
            }
            _ => CollectMode::Default,
        };

        let interval = self.interval.unwrap_or_else(default_interval);
        if interval == 0 {
            return Err(CollectorError::Config("Interval must be at least 1 second".to_string()));
        }
        let timeout = self.timeout.unwrap_or_else(default_timeout);
        if timeout == 0 {
            return Err(CollectorError::Config("Timeout must be at least 1 second".to_string()));
        }

        let field_length = self.field_length.unwrap_or(DEFAULT_FIELD_LENGTH);
        if field_length < 2 {
            return Err(CollectorError::Config(format!(
                "FieldLength must be at least 2, got {field_length}"
            )));
        }

        let cluster_name = match self.cluster_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => CLUSTER_DEFAULT.to_string(),
        };
        let dimensions = build_dimensions(&target, &cluster_name, self.dimensions.as_deref())?;

        Ok(TargetConfig {
            target,
            host,
            port,
            collect_mode,
            interval: Duration::from_secs(interval),
            cluster_name,
            dimensions,
            field_length,
            credentials: Credentials {
                username: self.username.clone().unwrap_or_default(),
                password: self.password.clone().unwrap_or_default(),
            },
            timeout: Duration::from_secs(timeout),
        })
    }
}

/// Basic-auth credentials. No auth header is sent only when both fields are
/// empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Validated, immutable settings of one collection target.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub target: TargetKind,
    pub host: String,
    pub port: u16,
    pub collect_mode: CollectMode,
    pub interval: Duration,
    pub cluster_name: String,
    /// Base tag set: service, cluster, bucket and the user's extra tags.
    pub dimensions: Dimensions,
    pub field_length: usize,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl TargetConfig {
    /// A fresh copy of the target's base tag set.
    pub fn base_dimensions(&self) -> Dimensions {
        self.dimensions.clone()
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval.as_secs()
    }

    /// Short label for logs, e.g. `BUCKET(beer)@db1:8091`.
    pub fn label(&self) -> String {
        format!("{}@{}:{}", self.target, self.host, self.port)
    }
}
