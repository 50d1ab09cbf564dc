//! In-memory score store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{StatsError, StatsResult};
use crate::traits::ScoreStore;
use crate::types::ScoreEntry;

/// Score store that keeps entries in memory for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryScoreStore {
    entries: RwLock<HashMap<String, ScoreEntry>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with entries.
    pub fn with_entries(entries: impl IntoIterator<Item = ScoreEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (e.address.clone(), e))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// All entries, sorted by address.
    pub async fn list(&self) -> Vec<ScoreEntry> {
        let mut entries: Vec<ScoreEntry> = self.entries.read().await.values().cloned().collect();
        entries.sort_by(|a, b| a.address.cmp(&b.address));
        entries
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn get(&self, address: &str) -> StatsResult<ScoreEntry> {
        self.entries
            .read()
            .await
            .get(address)
            .cloned()
            .ok_or_else(|| StatsError::HolderNotFound {
                address: address.to_string(),
            })
    }

    async fn insert(&self, entry: ScoreEntry) -> StatsResult<ScoreEntry> {
        self.entries
            .write()
            .await
            .insert(entry.address.clone(), entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: ScoreEntry) -> StatsResult<ScoreEntry> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&entry.address) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(entry)
            }
            None => Err(StatsError::HolderNotFound {
                address: entry.address,
            }),
        }
    }
}
