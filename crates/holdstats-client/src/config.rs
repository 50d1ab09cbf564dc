//! HTTP adapter configuration.

use serde::{Deserialize, Serialize};

/// Configuration shared by the holder source and scorer adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the holder enumeration API.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Base URL of the scoring API.
    #[serde(default = "default_scorer_url")]
    pub scorer_url: String,

    /// Bearer token sent to both APIs.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_source_url() -> String {
    "http://127.0.0.1:8080/v1".to_string()
}

fn default_scorer_url() -> String {
    "http://127.0.0.1:8081/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            scorer_url: default_scorer_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `HOLDSTATS_SOURCE_URL` | Holder enumeration API base URL |
    /// | `HOLDSTATS_SCORER_URL` | Scoring API base URL |
    /// | `HOLDSTATS_TOKEN` | Bearer token |
    /// | `HOLDSTATS_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Override fields with any `HOLDSTATS_*` variables that are set.
    pub fn merge_env(mut self) -> Self {
        if let Ok(url) = std::env::var("HOLDSTATS_SOURCE_URL") {
            self.source_url = url;
        }
        if let Ok(url) = std::env::var("HOLDSTATS_SCORER_URL") {
            self.scorer_url = url;
        }
        if let Ok(token) = std::env::var("HOLDSTATS_TOKEN") {
            self.token = Some(token);
        }
        if let Some(timeout) = std::env::var("HOLDSTATS_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_secs = timeout;
        }
        self
    }

    /// Set the holder source URL.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Set the scorer URL.
    pub fn with_scorer_url(mut self, url: impl Into<String>) -> Self {
        self.scorer_url = url.into();
        self
    }

    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "HOLDSTATS_SOURCE_URL",
            "HOLDSTATS_SCORER_URL",
            "HOLDSTATS_TOKEN",
            "HOLDSTATS_TIMEOUT",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("HOLDSTATS_SCORER_URL", "https://scores.example/v2");
        std::env::set_var("HOLDSTATS_TOKEN", "secret");
        std::env::set_var("HOLDSTATS_TIMEOUT", "not-a-number");

        let config = ClientConfig::from_env();
        assert_eq!(config.source_url, default_source_url());
        assert_eq!(config.scorer_url, "https://scores.example/v2");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 30);

        clear_env();
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"source_url": "https://holders.example"}"#).unwrap();
        assert_eq!(config.source_url, "https://holders.example");
        assert_eq!(config.scorer_url, default_scorer_url());
        assert!(config.token.is_none());
    }
}
