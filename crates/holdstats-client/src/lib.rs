//! HTTP adapters for holdstats.
//!
//! Implements `HolderSource` and `ScoreProvider` from `holdstats-core`
//! against REST APIs.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use holdstats_client::{ClientConfig, HttpHolderSource, HttpScoreProvider};
//! use holdstats_core::{Collection, HolderScoreOrchestrator, InMemoryScoreStore};
//!
//! # async fn example() -> Result<(), holdstats_core::StatsError> {
//! let config = ClientConfig::from_env();
//! let orchestrator = HolderScoreOrchestrator::new(
//!     Arc::new(HttpHolderSource::new(&config)?),
//!     Arc::new(HttpScoreProvider::new(&config)?),
//!     Arc::new(InMemoryScoreStore::new()),
//! );
//!
//! let collection = orchestrator.calculate_stats(Collection::new("78")).await?;
//! println!("{} holders", collection.holders_count);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod http;
pub mod scorer;
pub mod source;

pub use config::ClientConfig;
pub use http::HOLDSTATS_USER_AGENT;
pub use scorer::HttpScoreProvider;
pub use source::HttpHolderSource;
