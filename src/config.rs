//! Source API configuration
//!
//! Process-wide settings for talking to Airtable. Loaded from a YAML (or
//! JSON, which YAML parses too) file; every field has a default so an empty
//! file is valid.
//!
//! ```yaml
//! api_url: https://api.airtable.com/v0
//! timeout_secs: 30
//! requests_per_second: 5
//! page_size: 100
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default Airtable REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Largest page the records API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Settings for the Airtable HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Base URL of the REST API (metadata lives under `/meta`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side request rate (0 disables limiting)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Records per page when listing a table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    5
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            page_size: None,
        }
    }
}

impl SourceConfig {
    /// Config pointing at a different API root (mock servers, proxies)
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| Error::invalid_value("api_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }

        if let Some(size) = self.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(Error::invalid_value(
                    "page_size",
                    format!("must be between 1 and {MAX_PAGE_SIZE}"),
                ));
            }
        }

        Ok(())
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_secs));

        if self.requests_per_second == 0 {
            builder.no_rate_limit().build()
        } else {
            builder
                .rate_limit(RateLimiterConfig::per_second(self.requests_per_second))
                .build()
        }
    }
}

/// Load a source config from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<SourceConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a source config from a YAML or JSON string
pub fn load_config_from_str(content: &str) -> Result<SourceConfig> {
    let config: SourceConfig = if content.trim().is_empty() {
        SourceConfig::default()
    } else {
        serde_yaml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {e}")))?
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.api_url, "https://api.airtable.com/v0");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.requests_per_second, 5);
        assert!(config.page_size.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_string_is_default() {
        assert_eq!(load_config_from_str("").unwrap(), SourceConfig::default());
    }

    #[test]
    fn test_load_yaml() {
        let config = load_config_from_str(
            "api_url: http://localhost:9999/v0\nrequests_per_second: 0\npage_size: 50\n",
        )
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:9999/v0");
        assert_eq!(config.requests_per_second, 0);
        assert_eq!(config.page_size, Some(50));
        assert!(config.http_config().rate_limit.is_none());
    }

    #[test]
    fn test_load_json() {
        let config = load_config_from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.http_config().timeout,
            std::time::Duration::from_secs(5)
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = load_config_from_str("api_key: oops\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(load_config_from_str("page_size: 500\n").is_err());
        assert!(load_config_from_str("page_size: 0\n").is_err());
        assert!(load_config_from_str("timeout_secs: 0\n").is_err());
        assert!(load_config_from_str("api_url: ftp://example.com\n").is_err());
        assert!(load_config_from_str("api_url: not a url\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "requests_per_second: 2").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.requests_per_second, 2);
        assert_eq!(
            config.http_config().rate_limit,
            Some(RateLimiterConfig::new(2, 2))
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/nonexistent/airtable.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
