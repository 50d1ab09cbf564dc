//! Resolution configuration.

use chrono::{DateTime, Duration, Utc};

use crate::error::{StatsError, StatsResult};

/// Default freshness window (72 hours).
pub const DEFAULT_FRESHNESS_HOURS: i64 = 72;

/// How long a cached score stays usable before it must be re-fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    max_age: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::hours(DEFAULT_FRESHNESS_HOURS),
        }
    }
}

impl FreshnessPolicy {
    pub fn new(max_age: Duration) -> StatsResult<Self> {
        if max_age <= Duration::zero() {
            return Err(StatsError::Config {
                message: format!("freshness window must be positive, got {}", max_age),
            });
        }
        Ok(Self { max_age })
    }

    pub fn from_hours(hours: i64) -> StatsResult<Self> {
        let max_age = Duration::try_hours(hours).ok_or_else(|| StatsError::Config {
            message: format!("freshness window out of range: {} hours", hours),
        })?;
        Self::new(max_age)
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// An entry is stale once its age reaches the window.
    pub fn is_stale(&self, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(updated_at) >= self.max_age
    }
}
