//! Holder enumeration over HTTP.

use async_trait::async_trait;
use holdstats_core::{Collection, Holder, HolderSource, StatsResult};
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::http::{HttpBackend, Upstream};

#[derive(Debug, Deserialize)]
struct HoldersCountResponse {
    holders_count: usize,
}

#[derive(Debug, Deserialize)]
struct HoldersResponse {
    holders: Vec<String>,
}

/// `HolderSource` backed by the collection REST API.
///
/// - `GET {source_url}/collections/{id}` for the holder count
/// - `GET {source_url}/collections/{id}/holders?limit={n}` for the addresses
#[derive(Debug, Clone)]
pub struct HttpHolderSource {
    backend: HttpBackend,
}

impl HttpHolderSource {
    pub fn new(config: &ClientConfig) -> StatsResult<Self> {
        Ok(Self {
            backend: HttpBackend::new(
                &config.source_url,
                config.token.clone(),
                config.timeout_secs,
                Upstream::Source,
            )?,
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        self.backend.base_url().as_str()
    }
}

#[async_trait]
impl HolderSource for HttpHolderSource {
    async fn holders_count(&self, collection: &Collection) -> StatsResult<usize> {
        let url = self.backend.endpoint(&["collections", collection.id.as_str()])?;
        let response: HoldersCountResponse = self.backend.get_json(url).await?;
        Ok(response.holders_count)
    }

    async fn holders(&self, mut collection: Collection) -> StatsResult<Collection> {
        let mut url = self
            .backend
            .endpoint(&["collections", collection.id.as_str(), "holders"])?;
        url.query_pairs_mut()
            .append_pair("limit", &collection.holders_count.to_string());

        let response: HoldersResponse = self.backend.get_json(url).await?;
        debug!(
            collection = %collection.id,
            holders = response.holders.len(),
            "enumerated holders"
        );

        collection.holders = response.holders.into_iter().map(Holder::new).collect();
        Ok(collection)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
