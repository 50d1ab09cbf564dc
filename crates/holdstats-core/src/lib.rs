//! Holder score resolution and distribution aggregation for art collections.
//!
//! This crate provides:
//!
//! - `HolderScoreOrchestrator`: resolves every holder's score with
//!   cache-aside semantics and a configurable freshness window
//! - `DistributionAggregator`: counts resolved holders into score buckets
//! - Collaborator traits (`HolderSource`, `ScoreProvider`, `ScoreStore`)
//! - In-memory and SQLite score stores
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use holdstats_core::{
//!     Collection, HolderScoreOrchestrator, HolderSource, ScoreProvider, SqliteScoreStore,
//! };
//!
//! # async fn example(
//! #     source: Arc<dyn HolderSource>,
//! #     scorer: Arc<dyn ScoreProvider>,
//! # ) -> Result<(), holdstats_core::StatsError> {
//! let store = Arc::new(SqliteScoreStore::open("scores.db".as_ref())?);
//! let orchestrator = HolderScoreOrchestrator::new(source, scorer, store);
//!
//! let collection = orchestrator.calculate_stats(Collection::new("78")).await?;
//! if let Some(distribution) = &collection.distribution {
//!     for bucket in &distribution.buckets {
//!         println!("{}: {}", bucket.label, bucket.holders);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod orchestrator;
pub mod store;
pub mod traits;
pub mod types;

pub use config::{FreshnessPolicy, DEFAULT_FRESHNESS_HOURS};
pub use distribution::{Bucket, BucketScheme, Distribution, DistributionAggregator};
pub use error::{StatsError, StatsResult};
pub use orchestrator::{HolderScoreOrchestrator, ScoreSource};
pub use store::{InMemoryScoreStore, SqliteScoreStore};
pub use traits::{HolderSource, ScoreProvider, ScoreStore};
pub use types::{Collection, Holder, ScoreEntry};
