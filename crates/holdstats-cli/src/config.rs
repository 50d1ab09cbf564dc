//! `holdstats.yaml` loading.
//!
//! Precedence, lowest first: defaults, config file, `HOLDSTATS_*`
//! environment, command-line flags.

use std::path::{Path, PathBuf};

use holdstats_client::ClientConfig;
use holdstats_core::{BucketScheme, StatsError, StatsResult, DEFAULT_FRESHNESS_HOURS};
use serde::{Deserialize, Serialize};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "holdstats.yaml";

/// Score store used when neither `--store` nor `store_path` is set.
pub const DEFAULT_STORE_PATH: &str = ".holdstats/scores.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default = "default_freshness_hours")]
    pub freshness_hours: i64,

    #[serde(default)]
    pub buckets: BucketScheme,

    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_freshness_hours() -> i64 {
    DEFAULT_FRESHNESS_HOURS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            client: ClientConfig::default(),
            freshness_hours: default_freshness_hours(),
            buckets: BucketScheme::default(),
            store_path: None,
        }
    }
}

impl AppConfig {
    /// Load the explicit config file, or `holdstats.yaml` when present,
    /// then apply environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> StatsResult<Self> {
        let config = match explicit {
            Some(path) => load_config(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    load_config(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.merge_env())
    }

    pub fn merge_env(mut self) -> Self {
        self.client = self.client.merge_env();
        self
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH))
    }
}

pub fn load_config(path: &Path) -> StatsResult<AppConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| StatsError::Config {
        message: format!("failed to read config {}: {}", path.display(), e),
    })?;
    parse_config(&raw).map_err(|e| match e {
        StatsError::Config { message } => StatsError::Config {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })
}

fn parse_config(raw: &str) -> StatsResult<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(raw).map_err(|e| StatsError::Config {
        message: format!("failed to parse YAML: {}", e),
    })?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(StatsError::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                cfg.version, SUPPORTED_CONFIG_VERSION
            ),
        });
    }
    Ok(cfg)
}
