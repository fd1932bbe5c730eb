//! Configuration Management
//!
//! Optional settings file for tagsweep. Every field can also be given on
//! the command line, which wins over the file.

use crate::aws::regions::{default_regions, is_valid_region};
use crate::resource::{RegionErrorPolicy, RetryPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Retry settings as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            min_delay_ms: policy.min_delay.as_millis() as u64,
            max_delay_ms: policy.max_delay.as_millis() as u64,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms.max(self.min_delay_ms)),
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Regions to sweep instead of the built-in list
    #[serde(default)]
    pub regions: Option<Vec<String>>,
    /// AWS shared-config profile
    #[serde(default)]
    pub profile: Option<String>,
    /// Endpoint override for the tagging API
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub on_region_error: RegionErrorPolicy,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tagsweep").join("config.json"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_json(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config file {:?}: {:#}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Could not read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config JSON")
    }

    /// Get effective regions (CLI > config > built-in list)
    pub fn effective_regions(&self, cli_regions: &[String]) -> Vec<String> {
        let regions = if !cli_regions.is_empty() {
            cli_regions.to_vec()
        } else if let Some(regions) = self.regions.as_ref().filter(|r| !r.is_empty()) {
            regions.clone()
        } else {
            default_regions()
        };

        for region in &regions {
            if !is_valid_region(region) {
                tracing::warn!("'{}' does not look like an AWS region name", region);
            }
        }

        regions
    }

    /// Get effective profile (CLI > config)
    pub fn effective_profile(&self, cli_profile: Option<&str>) -> Option<String> {
        cli_profile.map(str::to_string).or_else(|| self.profile.clone())
    }

    /// Get effective endpoint override (CLI > config)
    pub fn effective_endpoint_url(&self, cli_endpoint: Option<&str>) -> Option<String> {
        cli_endpoint
            .map(str::to_string)
            .or_else(|| self.endpoint_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert!(config.regions.is_none());
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.on_region_error, RegionErrorPolicy::Skip);
    }

    #[test]
    fn test_full_json() {
        let config = Config::from_json(
            r#"{
                "regions": ["eu-west-1"],
                "profile": "audit",
                "endpoint_url": "http://localhost:4566",
                "retry": { "max_retries": 2, "min_delay_ms": 50 },
                "on_region_error": "abort"
            }"#,
        )
        .unwrap();

        assert_eq!(config.regions, Some(vec!["eu-west-1".to_string()]));
        assert_eq!(config.profile.as_deref(), Some("audit"));
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.retry.min_delay_ms, 50);
        assert_eq!(config.retry.max_delay_ms, RetryConfig::default().max_delay_ms);
        assert_eq!(config.on_region_error, RegionErrorPolicy::Abort);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Config::from_json("{ regions: ").is_err());
        assert!(Config::from_json(r#"{"on_region_error": "explode"}"#).is_err());
    }

    #[test]
    fn test_region_precedence() {
        let config = Config {
            regions: Some(vec!["eu-west-1".to_string()]),
            ..Default::default()
        };

        let cli = vec!["ap-south-1".to_string()];
        assert_eq!(config.effective_regions(&cli), cli);
        assert_eq!(config.effective_regions(&[]), vec!["eu-west-1".to_string()]);
        assert_eq!(Config::default().effective_regions(&[]).len(), 17);
    }

    #[test]
    fn test_empty_config_region_list_falls_back() {
        let config = Config {
            regions: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(config.effective_regions(&[]), default_regions());
    }

    #[test]
    fn test_profile_and_endpoint_precedence() {
        let config = Config {
            profile: Some("from-file".to_string()),
            endpoint_url: Some("http://file".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_profile(Some("cli")).as_deref(), Some("cli"));
        assert_eq!(config.effective_profile(None).as_deref(), Some("from-file"));
        assert_eq!(
            config.effective_endpoint_url(None).as_deref(),
            Some("http://file")
        );
    }

    #[test]
    fn test_retry_policy_clamps_max_delay() {
        let retry = RetryConfig {
            max_retries: 1,
            min_delay_ms: 500,
            max_delay_ms: 100,
        };
        let policy = retry.to_policy();
        assert_eq!(policy.min_delay, Duration::from_millis(500));
        assert_eq!(policy.max_delay, Duration::from_millis(500));
    }
}
