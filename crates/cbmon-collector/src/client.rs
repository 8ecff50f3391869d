use crate::config::{Credentials, TargetConfig};
use crate::error::{CollectorError, Result};
use reqwest::{Client, Url};
use serde_json::Value;

pub const NODE_LIST_PATH: &str = "/pools/default";

pub fn bucket_path(bucket: &str) -> String {
    format!("/pools/default/buckets/{bucket}")
}

pub fn bucket_nodes_path(bucket: &str) -> String {
    format!("/pools/default/buckets/{bucket}/nodes")
}

/// Read access to the cluster's administrative REST API.
///
/// Implementations return the parsed JSON body of a successful GET, or the
/// error that kept it from being read.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// `path` is either absolute from the API root (`/pools/default`) or a
    /// full URL as returned inside other responses.
    async fn get_json(&self, path: &str) -> Result<Value>;
}

/// [`ApiClient`] over HTTP with optional basic auth and a per-call timeout.
///
/// Basic auth is sent unless both username and password are empty.
pub struct RestClient {
    base_url: Url,
    credentials: Credentials,
    client: Client,
}

impl RestClient {
    /// # Errors
    ///
    /// Returns [`CollectorError::Config`] if the host/port do not form a
    /// valid URL or the HTTP client cannot be built.
    pub fn new(config: &TargetConfig) -> Result<Self> {
        let base_url = Url::parse(&format!("http://{}:{}/", config.host, config.port))
            .map_err(|e| CollectorError::Config(format!("invalid Host/Port: {e}")))?;
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CollectorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            credentials: config.credentials.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| CollectorError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ApiClient for RestClient {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.resolve(path)?;
        let mut request = self.client.get(url);
        if !self.credentials.is_anonymous() {
            request = request.basic_auth(&self.credentials.username, Some(&self.credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CollectorError::Http {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
