use anyhow::{bail, Context};
use cbmon_collector::config::{TargetConfig, TargetSettings};
use serde::Deserialize;
use tracing_subscriber::filter::Directive;

fn default_log_filter() -> String {
    "cbmon=info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Tracing directive added on top of `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// One `[[target]]` table per collection target.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetSettings>,
}

impl AgentConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file {path}"))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {path}"))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Splits `log_filter` into `EnvFilter` directives.
    pub fn log_directives(&self) -> anyhow::Result<Vec<Directive>> {
        self.log_filter
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| {
                d.parse::<Directive>()
                    .with_context(|| format!("invalid log_filter directive '{d}'"))
            })
            .collect()
    }

    /// Validates every target. Any invalid target fails the whole config.
    pub fn resolve_targets(&self) -> anyhow::Result<Vec<TargetConfig>> {
        if self.targets.is_empty() {
            bail!("no [[target]] configured");
        }
        self.targets
            .iter()
            .enumerate()
            .map(|(i, settings)| {
                settings
                    .resolve()
                    .with_context(|| format!("target #{} is invalid", i + 1))
            })
            .collect()
    }
}
