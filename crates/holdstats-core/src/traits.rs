//! Collaborator interfaces consumed by the orchestrator.
//!
//! Implementations are long-lived and shared across resolutions; the
//! orchestrator never owns their lifecycle.

use async_trait::async_trait;

use crate::error::StatsResult;
use crate::types::{Collection, ScoreEntry};

/// Enumerates the holders of a collection.
#[async_trait]
pub trait HolderSource: Send + Sync {
    /// Number of distinct holders in the collection.
    async fn holders_count(&self, collection: &Collection) -> StatsResult<usize>;

    /// Fill in holder addresses for a collection whose `holders_count` is set.
    async fn holders(&self, collection: Collection) -> StatsResult<Collection>;

    fn name(&self) -> &'static str;
}

/// External scoring service.
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    /// Fetch a fresh score for `entry.address`.
    ///
    /// The returned entry keeps the address and carries the new score and the
    /// time it was produced.
    async fn fetch_score(&self, entry: &ScoreEntry) -> StatsResult<ScoreEntry>;

    fn name(&self) -> &'static str;
}

/// Persistent holder score store.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Look up an entry. Fails with `StatsError::HolderNotFound` when absent.
    async fn get(&self, address: &str) -> StatsResult<ScoreEntry>;

    /// Insert a new entry and return the stored record.
    async fn insert(&self, entry: ScoreEntry) -> StatsResult<ScoreEntry>;

    /// Replace the score and timestamp of an existing entry.
    async fn update(&self, entry: ScoreEntry) -> StatsResult<ScoreEntry>;
}
