//! Low-level HTTP client — `OverlayHttp`.
//!
//! One method per upstream endpoint. Returns wire types; conversion to
//! domain types happens in the sub-clients. Credentials are attached here
//! and nowhere else.

use crate::domain::market::wire::{CoinResponse, MarketChartResponse, MarketsListEntry};
use crate::domain::rarity::wire::MetadataDocument;
use crate::domain::sales::wire::EventsEnvelope;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::network::{MARKETPLACE_API_KEY_HEADER, MARKET_API_KEY_HEADER};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Maximum number of events the marketplace provider returns per request.
pub const MAX_SALES_LIMIT: u32 = 50;

/// Low-level REST client for both upstream providers.
#[derive(Clone)]
pub struct OverlayHttp {
    market_base_url: String,
    marketplace_base_url: String,
    client: Client,
    /// Optional — the market provider serves an unauthenticated tier.
    market_api_key: Option<String>,
    /// Required by the marketplace provider; enforced at the proxy, not here.
    marketplace_api_key: Option<String>,
}

impl OverlayHttp {
    pub fn new(market_base_url: &str, marketplace_base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            market_base_url: market_base_url.trim_end_matches('/').to_string(),
            marketplace_base_url: marketplace_base_url.trim_end_matches('/').to_string(),
            client,
            market_api_key: None,
            marketplace_api_key: None,
        }
    }

    pub fn with_market_api_key(mut self, key: Option<String>) -> Self {
        self.market_api_key = key;
        self
    }

    pub fn with_marketplace_api_key(mut self, key: Option<String>) -> Self {
        self.marketplace_api_key = key;
        self
    }

    // ── Market data ──────────────────────────────────────────────────────

    pub async fn get_market_chart(
        &self,
        asset_id: &str,
        vs_currency: &str,
        lookback_days: u32,
        interval: Option<&str>,
    ) -> Result<MarketChartResponse, HttpError> {
        let mut url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.market_base_url,
            urlencoding::encode(asset_id),
            urlencoding::encode(vs_currency),
            lookback_days
        );
        if let Some(i) = interval {
            url = format!("{}&interval={}", url, i);
        }
        self.get(&url, self.market_key_header(), RetryPolicy::Idempotent)
            .await
    }

    pub async fn get_coin(&self, asset_id: &str) -> Result<CoinResponse, HttpError> {
        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&community_data=false&developer_data=false&sparkline=false",
            self.market_base_url,
            urlencoding::encode(asset_id)
        );
        self.get(&url, self.market_key_header(), RetryPolicy::Idempotent)
            .await
    }

    pub async fn get_coins_markets(
        &self,
        asset_ids: &[&str],
        vs_currency: &str,
    ) -> Result<Vec<MarketsListEntry>, HttpError> {
        let ids = asset_ids.join(",");
        let url = format!(
            "{}/coins/markets?vs_currency={}&ids={}&price_change_percentage=1h",
            self.market_base_url,
            urlencoding::encode(vs_currency),
            urlencoding::encode(&ids)
        );
        self.get(&url, self.market_key_header(), RetryPolicy::Idempotent)
            .await
    }

    // ── Marketplace events ───────────────────────────────────────────────

    pub async fn get_collection_sales(
        &self,
        collection: &str,
        limit: u32,
    ) -> Result<EventsEnvelope, HttpError> {
        let url = format!(
            "{}/events/collection/{}?event_type=sale&limit={}",
            self.marketplace_base_url,
            urlencoding::encode(collection),
            limit.min(MAX_SALES_LIMIT)
        );
        self.get(&url, self.marketplace_key_header(), RetryPolicy::Idempotent)
            .await
    }

    // ── NFT metadata ─────────────────────────────────────────────────────

    /// Fetch a metadata document by absolute URL, without credentials and
    /// without retries — a failed lookup is cached by the caller.
    pub async fn get_nft_metadata(&self, url: &str) -> Result<MetadataDocument, HttpError> {
        self.get(url, None, RetryPolicy::None).await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn market_key_header(&self) -> Option<(&'static str, &str)> {
        self.market_api_key
            .as_deref()
            .map(|k| (MARKET_API_KEY_HEADER, k))
    }

    fn marketplace_key_header(&self) -> Option<(&'static str, &str)> {
        self.marketplace_api_key
            .as_deref()
            .map(|k| (MARKETPLACE_API_KEY_HEADER, k))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        api_key: Option<(&str, &str)>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(url, api_key).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T>(url, api_key).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned>(
        &self,
        url: &str,
        api_key: Option<(&str, &str)>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.get(url).header("Accept", "application/json");

        if let Some((name, value)) = api_key {
            req = req.header(name, value);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}
