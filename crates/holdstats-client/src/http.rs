//! HTTP layer: URL building and status mapping.
//!
//! This is the ONLY place for status code handling. Adapters never
//! interpret status codes. Every request is attempted once.

use std::time::Duration;

use holdstats_core::{StatsError, StatsResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// User-Agent sent with every request.
pub const HOLDSTATS_USER_AGENT: &str = concat!("holdstats-client/", env!("CARGO_PKG_VERSION"));

/// Which collaborator a backend talks to; selects the error variant for
/// upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upstream {
    Source,
    Scorer,
}

impl Upstream {
    fn error(self, message: String) -> StatsError {
        match self {
            Self::Source => StatsError::Source { message },
            Self::Scorer => StatsError::Scorer { message },
        }
    }
}

/// HTTP backend for one upstream API (holds reqwest client, base URL, token).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    upstream: Upstream,
}

impl HttpBackend {
    pub(crate) fn new(
        base_url: &str,
        token: Option<String>,
        timeout_secs: u64,
        upstream: Upstream,
    ) -> StatsResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| StatsError::Config {
            message: format!("invalid base URL {:?}: {}", base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StatsError::Config {
                message: format!("base URL cannot carry a path: {}", base_url),
            });
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(HOLDSTATS_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| StatsError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            token,
            upstream,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> StatsResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StatsError::Config {
                message: format!("base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> StatsResult<T> {
        debug!(url = %url, "GET");
        let response = self.request(url.clone()).await?;

        response
            .json()
            .await
            .map_err(|e| StatsError::InvalidResponse {
                message: format!("failed to decode response from {}: {}", url, e),
            })
    }

    async fn request(&self, url: Url) -> StatsResult<reqwest::Response> {
        let mut request = self.client.get(url.clone());

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| StatsError::Network {
            message: format!("request to {} failed: {}", url, e),
        })?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => Ok(response),

            401 | 403 => Err(StatsError::Unauthorized {
                message: format!("{} rejected credentials (HTTP {})", url, status.as_u16()),
            }),

            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs);

                Err(StatsError::RateLimited { retry_after })
            }

            _ => {
                let body = response.text().await.unwrap_or_default();
                let detail: String = body.chars().take(200).collect();
                Err(self.upstream.error(format!(
                    "HTTP {} from {}: {}",
                    status.as_u16(),
                    url,
                    if detail.is_empty() {
                        status.to_string()
                    } else {
                        detail
                    }
                )))
            }
        }
    }
}
