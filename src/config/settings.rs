// src/config/settings.rs
// =============================================================================
// The spider configuration file.
//
// Example spider.yaml:
//
//   url_list_file: ./data/url.data
//   output_directory: ./output
//   max_depth: 1
//   crawl_interval: 1
//   crawl_timeout: 1
//   target_url_pattern: ".*.(htm|html)$"
//   worker_count: 8
//
// Intervals and timeouts are whole seconds, at most one day.
// =============================================================================

use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::ConfigError;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "spider.yaml";

/// Upper bound for `crawl_interval` and `crawl_timeout`, in seconds.
pub const MAX_SECONDS: u64 = 86_400;

/// Validated crawl settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpiderConfig {
    /// JSON file holding the seed URLs
    pub url_list_file: PathBuf,
    /// Where pages matching the target pattern are written
    pub output_directory: PathBuf,
    /// Tasks at this depth or deeper are never fetched; seeds are depth 0
    pub max_depth: usize,
    /// Minimum seconds between two fetches of the same host
    pub crawl_interval: u64,
    /// Seconds a single fetch may take, connect and transfer together
    pub crawl_timeout: u64,
    /// Pages whose URL matches are saved
    pub target_url_pattern: String,
    /// Maximum number of tasks running at once
    pub worker_count: usize,
}

impl SpiderConfig {
    /// Reads `path` and checks every field.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading configuration");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents, path)
    }

    fn from_yaml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Rejects configurations the crawler cannot run with.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.url_list_file.as_os_str().is_empty() {
            return Err(ConfigError::Missing { field: "url_list_file" });
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(ConfigError::Missing { field: "output_directory" });
        }
        at_least("max_depth", self.max_depth as u64, 1)?;
        at_most("crawl_interval", self.crawl_interval, MAX_SECONDS)?;
        at_least("crawl_timeout", self.crawl_timeout, 1)?;
        at_most("crawl_timeout", self.crawl_timeout, MAX_SECONDS)?;
        compile_target_pattern(&self.target_url_pattern)?;
        at_least("worker_count", self.worker_count as u64, 1)?;
        Ok(())
    }

    pub fn crawl_interval(&self) -> Duration {
        Duration::from_secs(self.crawl_interval)
    }

    pub fn crawl_timeout(&self) -> Duration {
        Duration::from_secs(self.crawl_timeout)
    }
}

fn at_least(field: &'static str, value: u64, min: u64) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange { field, min, value });
    }
    Ok(())
}

fn at_most(field: &'static str, value: u64, max: u64) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::TooLarge { field, max, value });
    }
    Ok(())
}

/// Compiles the pattern deciding which crawled pages get saved.
pub fn compile_target_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
