//! Run settings, merged from defaults, an optional YAML file and the CLI.
//!
//! # File Format
//!
//! Every key is optional:
//!
//! ```yaml
//! listing_url: https://news.ycombinator.com/newest
//! target_count: 100
//! max_attempts: 10
//! request_timeout_secs: 15
//! user_agent: newest_order_check/0.1
//! json_output_dir: ./reports
//! ```

use crate::cli::Cli;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_LISTING_URL: &str = "https://news.ycombinator.com/newest";

/// Settings for a single check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    pub listing_url: String,
    /// Exact number of stories to collect and validate.
    pub target_count: usize,
    /// Maximum number of listing pages to read.
    pub max_attempts: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub json_output_dir: Option<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            target_count: 100,
            max_attempts: 10,
            request_timeout_secs: 15,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            json_output_dir: None,
        }
    }
}

impl CheckConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Apply any options given on the command line over these settings.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.url {
            self.listing_url = url.clone();
        }
        if let Some(count) = cli.count {
            self.target_count = count;
        }
        if let Some(max_attempts) = cli.max_attempts {
            self.max_attempts = max_attempts;
        }
        if let Some(secs) = cli.timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(user_agent) = &cli.user_agent {
            self.user_agent = user_agent.clone();
        }
        if let Some(dir) = &cli.json_output_dir {
            self.json_output_dir = Some(dir.clone());
        }
        self
    }
}

/// Parse settings from YAML text.
pub fn parse_config(yaml: &str) -> Result<CheckConfig, Box<dyn Error>> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a YAML config file.
#[instrument(level = "info")]
pub async fn load_config(path: &str) -> Result<CheckConfig, Box<dyn Error>> {
    let yaml = fs::read_to_string(path).await?;
    let config = parse_config(&yaml)?;
    info!(path, "Loaded configuration");
    Ok(config)
}

/// Resolve the settings for this run: defaults, then the config file named
/// by `--config` (if any), then the remaining CLI options.
pub async fn resolve(cli: &Cli) -> Result<CheckConfig, Box<dyn Error>> {
    let base = match &cli.config {
        Some(path) => load_config(path).await?,
        None => CheckConfig::default(),
    };
    Ok(base.with_overrides(cli))
}
