//! Collection, holder and score entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;

/// A set of art pieces under a common identifier, with its holders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection identifier (e.g., a project id).
    pub id: String,

    /// Number of distinct holders announced by the holder source.
    #[serde(default)]
    pub holders_count: usize,

    /// Holders in enumeration order.
    #[serde(default)]
    pub holders: Vec<Holder>,

    /// Score distribution, set by aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
}

impl Collection {
    /// Create an empty collection for the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether every announced holder is present and carries a score.
    pub fn is_resolved(&self) -> bool {
        self.holders.len() == self.holders_count && self.holders.iter().all(Holder::is_resolved)
    }
}

/// One address holding pieces of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    /// Holder address.
    pub address: String,

    /// Score, zero until resolved.
    #[serde(default)]
    pub score: f64,

    /// When the score was produced by the scorer. `None` until resolved.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Holder {
    /// Create an unscored holder.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            score: 0.0,
            updated_at: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.updated_at.is_some()
    }

    /// Score entry used to look this holder up or fetch its score.
    pub fn to_entry(&self) -> ScoreEntry {
        ScoreEntry {
            address: self.address.clone(),
            score: self.score,
            updated_at: self.updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

impl From<ScoreEntry> for Holder {
    fn from(entry: ScoreEntry) -> Self {
        Self {
            address: entry.address,
            score: entry.score,
            updated_at: Some(entry.updated_at),
        }
    }
}

/// Score store record, keyed by holder address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Holder address.
    pub address: String,

    /// Score as last returned by the scorer.
    pub score: f64,

    /// When the scorer produced the score.
    pub updated_at: DateTime<Utc>,
}

impl ScoreEntry {
    pub fn new(address: impl Into<String>, score: f64, updated_at: DateTime<Utc>) -> Self {
        Self {
            address: address.into(),
            score,
            updated_at,
        }
    }
}
