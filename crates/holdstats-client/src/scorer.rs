//! Holder scoring over HTTP.

use async_trait::async_trait;
use chrono::Utc;
use holdstats_core::{ScoreEntry, ScoreProvider, StatsError, StatsResult};
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::http::{HttpBackend, Upstream};

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    score: f64,
}

/// `ScoreProvider` backed by `GET {scorer_url}/holders/{address}/score`.
///
/// The scorer does not report when it computed a score, so the fetch time
/// is recorded as `updated_at`.
#[derive(Debug, Clone)]
pub struct HttpScoreProvider {
    backend: HttpBackend,
}

impl HttpScoreProvider {
    pub fn new(config: &ClientConfig) -> StatsResult<Self> {
        Ok(Self {
            backend: HttpBackend::new(
                &config.scorer_url,
                config.token.clone(),
                config.timeout_secs,
                Upstream::Scorer,
            )?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.backend.base_url().as_str()
    }
}

#[async_trait]
impl ScoreProvider for HttpScoreProvider {
    async fn fetch_score(&self, entry: &ScoreEntry) -> StatsResult<ScoreEntry> {
        let url = self
            .backend
            .endpoint(&["holders", entry.address.as_str(), "score"])?;
        let response: ScoreResponse = self.backend.get_json(url).await?;

        if !response.score.is_finite() {
            return Err(StatsError::InvalidResponse {
                message: format!("non-finite score for {}", entry.address),
            });
        }

        Ok(ScoreEntry::new(
            entry.address.clone(),
            response.score,
            Utc::now(),
        ))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
