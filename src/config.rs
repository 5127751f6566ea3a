use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::client::DEFAULT_TIMEOUT;
use crate::error::{NotifyError, Result};
use crate::links::{LinkFormatter, HIDE_LINKS_ENV};
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};

pub const HOOK_URL_ENV: &str = "TEAMS_HOOK_URL";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub hook_url: Option<String>,
    pub hide_links: bool,
    pub max_attempts: Option<u32>,
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| NotifyError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| NotifyError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "teams-notify")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(NotifyError::NoConfigDir)
    }

    /// Get the webhook URL (or its encrypted blob) with env var taking precedence over config file
    pub fn hook_url(&self) -> Result<String> {
        if let Ok(url) = std::env::var(HOOK_URL_ENV) {
            if !url.is_empty() {
                return Ok(url);
            }
        }

        self.hook_url.clone().ok_or(NotifyError::MissingHookUrl)
    }

    /// Link formatting, with `HIDE_AWS_LINKS` taking precedence over config file
    pub fn link_formatter(&self) -> LinkFormatter {
        if std::env::var_os(HIDE_LINKS_ENV).is_some() {
            return LinkFormatter::from_env();
        }
        LinkFormatter::new(!self.hide_links)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_max_attempts(self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
            hook_url = "https://example.webhook.office.com/webhookb2/abc"
            hide_links = true
            max_attempts = 5
            timeout_ms = 1000
            "#,
        )
        .unwrap();

        assert_eq!(
            config.hook_url.as_deref(),
            Some("https://example.webhook.office.com/webhookb2/abc")
        );
        assert!(config.hide_links);
        assert_eq!(config.retry_policy().max_attempts, 5);
        assert_eq!(config.timeout(), Duration::from_millis(1000));
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.hook_url.is_none());
        assert!(!config.hide_links);
        assert_eq!(config.retry_policy().max_attempts, 3);
        assert_eq!(config.timeout(), Duration::from_millis(3500));
    }
}
