//! Score distribution aggregation.
//!
//! Holders are counted into fixed-width score buckets:
//!
//! ```text
//! bucket i   = [i * width, (i + 1) * width)
//! last bucket = [(buckets - 1) * width, +inf)
//! ```
//!
//! Negative and NaN scores count towards the first bucket. With the default
//! scheme (width 10, 10 buckets) the labels are `0-10`, `10-20`, ..., `90+`.
//! The default scheme is part of the output contract and does not change
//! between releases.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::types::Collection;

fn default_width() -> f64 {
    10.0
}

fn default_buckets() -> usize {
    10
}

/// Fixed-width bucketing scheme.
///
/// Always valid: built through `new`, `default` or deserialization, all of
/// which reject a non-positive width and a zero bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBucketScheme")]
pub struct BucketScheme {
    /// Width of each bucket in score units.
    width: f64,

    /// Number of buckets, the last one open-ended.
    buckets: usize,
}

#[derive(Deserialize)]
struct RawBucketScheme {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_buckets")]
    buckets: usize,
}

impl TryFrom<RawBucketScheme> for BucketScheme {
    type Error = StatsError;

    fn try_from(raw: RawBucketScheme) -> StatsResult<Self> {
        Self::new(raw.width, raw.buckets)
    }
}

impl Default for BucketScheme {
    fn default() -> Self {
        Self {
            width: default_width(),
            buckets: default_buckets(),
        }
    }
}

impl BucketScheme {
    pub fn new(width: f64, buckets: usize) -> StatsResult<Self> {
        let scheme = Self { width, buckets };
        scheme.validate()?;
        Ok(scheme)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    fn validate(&self) -> StatsResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(StatsError::Config {
                message: format!("bucket width must be a positive number, got {}", self.width),
            });
        }
        if self.buckets == 0 {
            return Err(StatsError::Config {
                message: "bucket count must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Bucket index for a score.
    pub fn index_of(&self, score: f64) -> usize {
        if score.is_nan() || score <= 0.0 {
            return 0;
        }
        let idx = (score / self.width).floor();
        let last = self.buckets.saturating_sub(1);
        if idx >= last as f64 {
            last
        } else {
            idx as usize
        }
    }

    fn bucket(&self, idx: usize) -> Bucket {
        let lower = idx as f64 * self.width;
        if idx + 1 == self.buckets {
            Bucket {
                label: format!("{}+", lower),
                lower,
                upper: None,
                holders: 0,
            }
        } else {
            let upper = (idx + 1) as f64 * self.width;
            Bucket {
                label: format!("{}-{}", lower, upper),
                lower,
                upper: Some(upper),
                holders: 0,
            }
        }
    }
}

/// One score range and the number of holders in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,

    /// Inclusive lower bound.
    pub lower: f64,

    /// Exclusive upper bound, `None` for the open-ended last bucket.
    pub upper: Option<f64>,

    pub holders: usize,
}

/// Holder counts per score bucket, in ascending bucket order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub total: usize,
    pub buckets: Vec<Bucket>,
}

impl Distribution {
    /// Holder count for a bucket label.
    pub fn count(&self, label: &str) -> Option<usize> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.holders)
    }

    /// Label of the bucket that holds `score` under `scheme`.
    pub fn label_for(scheme: &BucketScheme, score: f64) -> String {
        scheme.bucket(scheme.index_of(score)).label
    }
}

/// Counts resolved holders into score buckets.
#[derive(Debug, Clone, Default)]
pub struct DistributionAggregator {
    scheme: BucketScheme,
}

impl DistributionAggregator {
    pub fn new(scheme: BucketScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &BucketScheme {
        &self.scheme
    }

    /// Build the distribution of a collection's holders by score.
    ///
    /// Pure: the collection is only read.
    pub fn summarize(&self, collection: &Collection) -> Distribution {
        let mut buckets: Vec<Bucket> = (0..self.scheme.buckets)
            .map(|idx| self.scheme.bucket(idx))
            .collect();

        for holder in &collection.holders {
            if let Some(bucket) = buckets.get_mut(self.scheme.index_of(holder.score)) {
                bucket.holders += 1;
            }
        }

        Distribution {
            total: collection.holders.len(),
            buckets,
        }
    }
}
