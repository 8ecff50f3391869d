/// Errors raised while configuring a target or reading the cluster API.
///
/// Only [`CollectorError::Config`] is fatal; every other variant is scoped to
/// the single fetch that produced it.
///
/// # Examples
///
/// ```rust
/// use cbmon_collector::error::CollectorError;
///
/// let err = CollectorError::MissingField { field: "storageTotals".to_string() };
/// assert!(err.to_string().contains("storageTotals"));
/// assert!(!err.is_fatal());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// Missing or invalid target settings, including a malformed
    /// `Dimensions` value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx status code from the cluster API.
    #[error("API HTTP error: path={path}, status={status}, body={body}")]
    Http {
        path: String,
        status: u16,
        body: String,
    },

    /// Connection failure or timeout from `reqwest`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A path or URL taken from a response cannot be joined onto the API
    /// base URL.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The response parsed but lacks a key the protocol relies on.
    #[error("Response is missing expected field: {field}")]
    MissingField { field: String },

    /// The node list did not flag exactly one node as the local one.
    #[error("Cannot resolve local node: {flagged} nodes flagged as thisNode")]
    LeadershipAmbiguous { flagged: usize },
}

impl CollectorError {
    pub fn missing(field: &str) -> Self {
        CollectorError::MissingField {
            field: field.to_string(),
        }
    }

    /// Whether this error must stop the agent from starting.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CollectorError::Config(_))
    }
}

/// Convenience type alias so callers can write `error::Result<T>`.
pub type Result<T> = std::result::Result<T, CollectorError>;
