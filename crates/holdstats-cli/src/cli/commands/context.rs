//! Wiring shared by the resolving commands: config layering, store
//! selection, orchestrator construction and Ctrl-C cancellation.

use std::path::PathBuf;
use std::sync::Arc;

use holdstats_client::{HttpHolderSource, HttpScoreProvider};
use holdstats_core::{
    FreshnessPolicy, HolderScoreOrchestrator, InMemoryScoreStore, ScoreEntry, ScoreStore,
    SqliteScoreStore, StatsResult,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cli::args::GlobalArgs;
use crate::config::AppConfig;

/// Config file, environment and flags merged, in that order.
pub(crate) fn load_config(global: &GlobalArgs) -> StatsResult<AppConfig> {
    let mut config = AppConfig::resolve(global.config.as_deref())?;
    if let Some(hours) = global.freshness_hours {
        config.freshness_hours = hours;
    }
    if let Some(path) = &global.store {
        config.store_path = Some(path.clone());
    }
    Ok(config)
}

pub(crate) enum StoreHandle {
    Memory(Arc<InMemoryScoreStore>),
    Sqlite {
        store: Arc<SqliteScoreStore>,
        path: PathBuf,
    },
}

impl StoreHandle {
    pub(crate) fn open(global: &GlobalArgs, config: &AppConfig) -> StatsResult<Self> {
        if global.ephemeral {
            debug!("using in-memory score store");
            return Ok(Self::Memory(Arc::new(InMemoryScoreStore::new())));
        }

        let path = config.store_path();
        debug!(path = %path.display(), "opening score store");
        Ok(Self::Sqlite {
            store: Arc::new(SqliteScoreStore::open(&path)?),
            path,
        })
    }

    pub(crate) fn shared(&self) -> Arc<dyn ScoreStore> {
        match self {
            Self::Memory(store) => store.clone(),
            Self::Sqlite { store, .. } => store.clone(),
        }
    }

    pub(crate) async fn list(&self) -> StatsResult<Vec<ScoreEntry>> {
        match self {
            Self::Memory(store) => Ok(store.list().await),
            Self::Sqlite { store, .. } => store.list(),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "memory".to_string(),
            Self::Sqlite { path, .. } => path.display().to_string(),
        }
    }
}

pub(crate) fn build_orchestrator(
    config: &AppConfig,
    store: &StoreHandle,
) -> StatsResult<HolderScoreOrchestrator> {
    let freshness = FreshnessPolicy::from_hours(config.freshness_hours)?;

    let source = HttpHolderSource::new(&config.client)?;
    let scorer = HttpScoreProvider::new(&config.client)?;
    debug!(
        source = source.base_url(),
        scorer = scorer.base_url(),
        freshness_hours = config.freshness_hours,
        "configured collaborators"
    );

    Ok(
        HolderScoreOrchestrator::new(Arc::new(source), Arc::new(scorer), store.shared())
            .with_freshness(freshness)
            .with_buckets(config.buckets),
    )
}

/// Cancellation signal raised on the first Ctrl-C.
pub(crate) fn cancel_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current holder");
            let _ = tx.send(true);
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ephemeral_store_starts_empty() {
        let global = GlobalArgs {
            ephemeral: true,
            ..GlobalArgs::default()
        };
        let store = StoreHandle::open(&global, &AppConfig::default()).unwrap();

        assert_eq!(store.describe(), "memory");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_store_at_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.db");
        let config = AppConfig {
            store_path: Some(path.clone()),
            ..AppConfig::default()
        };

        let store = StoreHandle::open(&GlobalArgs::default(), &config).unwrap();
        assert_eq!(store.describe(), path.display().to_string());
        assert!(path.exists());
    }

    #[test]
    fn test_orchestrator_rejects_zero_freshness() {
        let config = AppConfig {
            freshness_hours: 0,
            ..AppConfig::default()
        };
        let store = StoreHandle::Memory(Arc::new(InMemoryScoreStore::new()));

        let err = build_orchestrator(&config, &store).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }
}
