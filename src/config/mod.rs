// src/config/mod.rs
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Health endpoint to poll.
    pub endpoint: Url,
    pub timeout_secs: u64,
    pub auto: AutoRefreshConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutoRefreshConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("http://127.0.0.1:8000/health")
                .expect("default endpoint URL is valid"),
            timeout_secs: 10,
            auto: AutoRefreshConfig::default(),
        }
    }
}

impl Default for AutoRefreshConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 5,
        }
    }
}

impl WidgetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        if self.auto.interval_secs == 0 {
            bail!("auto.interval_secs must be at least 1");
        }
        match self.endpoint.scheme() {
            "http" | "https" => {}
            other => bail!("unsupported endpoint scheme: {}", other),
        }
        Ok(())
    }
}

impl AutoRefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<WidgetConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .context("Failed to read config file")?;

    let config: WidgetConfig = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
        || path.extension().and_then(|s| s.to_str()) == Some("yml") {
        serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(&contents).context("Failed to parse JSON config")?
    };

    config.validate()?;
    Ok(config)
}
