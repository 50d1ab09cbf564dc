//! Holder score resolution.
//!
//! Resolves every holder of a collection with cache-aside semantics:
//! 1. Store hit within the freshness window: use the stored entry
//! 2. Store miss: fetch from the scorer, insert
//! 3. Store hit past the freshness window: fetch from the scorer, update
//!
//! Holders are processed one at a time in enumeration order. The first
//! collaborator failure ends the call; entries written before it stay in the
//! store.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::FreshnessPolicy;
use crate::distribution::{BucketScheme, DistributionAggregator};
use crate::error::{StatsError, StatsResult};
use crate::traits::{HolderSource, ScoreProvider, ScoreStore};
use crate::types::{Collection, Holder, ScoreEntry};

/// Where a holder's resolved score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    /// Fresh store entry.
    Cache,

    /// Store miss, fetched and inserted.
    Fetched,

    /// Stale store entry, re-fetched and updated.
    Refreshed,
}

impl std::fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Fetched => write!(f, "fetched"),
            Self::Refreshed => write!(f, "refreshed"),
        }
    }
}

#[derive(Debug, Default)]
struct ResolveCounts {
    cache: usize,
    fetched: usize,
    refreshed: usize,
}

impl ResolveCounts {
    fn record(&mut self, source: ScoreSource) {
        match source {
            ScoreSource::Cache => self.cache += 1,
            ScoreSource::Fetched => self.fetched += 1,
            ScoreSource::Refreshed => self.refreshed += 1,
        }
    }
}

/// Resolves holder scores for collections and summarizes them.
pub struct HolderScoreOrchestrator {
    source: Arc<dyn HolderSource>,
    scorer: Arc<dyn ScoreProvider>,
    store: Arc<dyn ScoreStore>,
    freshness: FreshnessPolicy,
    aggregator: DistributionAggregator,
}

impl HolderScoreOrchestrator {
    /// Create an orchestrator with the default freshness window and buckets.
    pub fn new(
        source: Arc<dyn HolderSource>,
        scorer: Arc<dyn ScoreProvider>,
        store: Arc<dyn ScoreStore>,
    ) -> Self {
        Self {
            source,
            scorer,
            store,
            freshness: FreshnessPolicy::default(),
            aggregator: DistributionAggregator::default(),
        }
    }

    /// Set the freshness window.
    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }

    /// Set the bucketing scheme used by `calculate_stats`.
    pub fn with_buckets(mut self, scheme: BucketScheme) -> Self {
        self.aggregator = DistributionAggregator::new(scheme);
        self
    }

    pub fn freshness(&self) -> &FreshnessPolicy {
        &self.freshness
    }

    pub fn aggregator(&self) -> &DistributionAggregator {
        &self.aggregator
    }

    /// Resolve holders and attach their score distribution.
    pub async fn calculate_stats(&self, collection: Collection) -> StatsResult<Collection> {
        let mut collection = self.resolve(collection).await?;
        collection.distribution = Some(self.aggregator.summarize(&collection));
        Ok(collection)
    }

    /// Like `calculate_stats`, stopping between holders once `cancel` is raised.
    pub async fn calculate_stats_with_cancel(
        &self,
        collection: Collection,
        cancel: &watch::Receiver<bool>,
    ) -> StatsResult<Collection> {
        let mut collection = self.resolve_with_cancel(collection, cancel).await?;
        collection.distribution = Some(self.aggregator.summarize(&collection));
        Ok(collection)
    }

    /// Enumerate the collection's holders and resolve their scores.
    pub async fn resolve(&self, collection: Collection) -> StatsResult<Collection> {
        let collection = self.enumerate(collection).await?;
        self.resolve_scores_inner(collection, None).await
    }

    /// Like `resolve`, stopping between holders once `cancel` is raised.
    pub async fn resolve_with_cancel(
        &self,
        collection: Collection,
        cancel: &watch::Receiver<bool>,
    ) -> StatsResult<Collection> {
        let collection = self.enumerate(collection).await?;
        self.resolve_scores_inner(collection, Some(cancel)).await
    }

    /// Resolve scores for holders whose addresses are already known.
    pub async fn resolve_scores(&self, collection: Collection) -> StatsResult<Collection> {
        self.resolve_scores_inner(collection, None).await
    }

    /// Like `resolve_scores`, stopping between holders once `cancel` is raised.
    pub async fn resolve_scores_with_cancel(
        &self,
        collection: Collection,
        cancel: &watch::Receiver<bool>,
    ) -> StatsResult<Collection> {
        self.resolve_scores_inner(collection, Some(cancel)).await
    }

    async fn enumerate(&self, mut collection: Collection) -> StatsResult<Collection> {
        debug!(collection = %collection.id, source = self.source.name(), "enumerating holders");

        let count = self
            .source
            .holders_count(&collection)
            .await
            .map_err(|e| e.during("resolve: source.holders_count"))?;

        let mut holders = Vec::new();
        holders.try_reserve_exact(count).map_err(|e| {
            StatsError::Source {
                message: format!("cannot allocate {} holders: {}", count, e),
            }
            .during("resolve: source.holders_count")
        })?;
        holders.resize(count, Holder::default());

        collection.holders_count = count;
        collection.holders = holders;
        collection.distribution = None;

        let collection = self
            .source
            .holders(collection)
            .await
            .map_err(|e| e.during("resolve: source.holders"))?;

        if collection.holders.len() != count {
            return Err(StatsError::CountMismatch {
                expected: count,
                actual: collection.holders.len(),
            }
            .during("resolve: source.holders"));
        }

        Ok(Collection {
            holders_count: count,
            ..collection
        })
    }

    async fn resolve_scores_inner(
        &self,
        mut collection: Collection,
        cancel: Option<&watch::Receiver<bool>>,
    ) -> StatsResult<Collection> {
        let mut counts = ResolveCounts::default();

        for idx in 0..collection.holders.len() {
            let cancelled = cancel.map(|rx| *rx.borrow()).unwrap_or(false);
            if cancelled {
                info!(collection = %collection.id, resolved = idx, "resolution cancelled");
                return Err(StatsError::Cancelled { resolved: idx });
            }

            let (entry, source) = self.resolve_holder(&collection.holders[idx]).await?;

            debug!(
                collection = %collection.id,
                index = idx,
                address = %entry.address,
                score = entry.score,
                source = %source,
                "resolved holder score"
            );

            counts.record(source);
            collection.holders[idx] = Holder::from(entry);
        }

        info!(
            collection = %collection.id,
            holders = collection.holders.len(),
            cache = counts.cache,
            fetched = counts.fetched,
            refreshed = counts.refreshed,
            "resolved holder scores"
        );

        Ok(collection)
    }

    async fn resolve_holder(&self, holder: &Holder) -> StatsResult<(ScoreEntry, ScoreSource)> {
        let cached = match self.store.get(&holder.address).await {
            Ok(entry) => entry,
            Err(e) if e.is_not_found() => {
                let fetched = self
                    .scorer
                    .fetch_score(&holder.to_entry())
                    .await
                    .map_err(|e| e.during("resolve_scores: scorer.fetch_score"))?;

                let inserted = self
                    .store
                    .insert(fetched)
                    .await
                    .map_err(|e| e.during("resolve_scores: store.insert"))?;

                return Ok((inserted, ScoreSource::Fetched));
            }
            Err(e) => return Err(e.during("resolve_scores: store.get")),
        };

        if !self.freshness.is_stale(cached.updated_at, Utc::now()) {
            return Ok((cached, ScoreSource::Cache));
        }

        debug!(
            address = %cached.address,
            updated_at = %cached.updated_at,
            "cached score is stale, refreshing"
        );

        let refreshed = self
            .scorer
            .fetch_score(&cached)
            .await
            .map_err(|e| e.during("resolve_scores: scorer.fetch_score"))?;

        let updated = self
            .store
            .update(refreshed)
            .await
            .map_err(|e| e.during("resolve_scores: store.update"))?;

        Ok((updated, ScoreSource::Refreshed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_source_display() {
        assert_eq!(ScoreSource::Cache.to_string(), "cache");
        assert_eq!(ScoreSource::Fetched.to_string(), "fetched");
        assert_eq!(ScoreSource::Refreshed.to_string(), "refreshed");
    }

    #[test]
    fn test_resolve_counts() {
        let mut counts = ResolveCounts::default();
        counts.record(ScoreSource::Cache);
        counts.record(ScoreSource::Fetched);
        counts.record(ScoreSource::Fetched);
        counts.record(ScoreSource::Refreshed);
        assert_eq!((counts.cache, counts.fetched, counts.refreshed), (1, 2, 1));
    }
}
