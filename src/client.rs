//! High-level client — `OverlayClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, shared cache state, and accessor methods.

use crate::domain::market::client::MarketData;
use crate::domain::rarity::RarityResolver;
use crate::domain::sales::client::Sales;
use crate::error::OverlayError;
use crate::http::OverlayHttp;
use crate::network::{DEFAULT_MARKETPLACE_API_URL, DEFAULT_MARKET_API_URL};

use std::sync::Arc;

/// The primary entry point for the overlay engine.
///
/// Provides nested sub-client accessors per domain: `client.market()`,
/// `client.sales()`, plus the shared rarity cache.
#[derive(Clone)]
pub struct OverlayClient {
    pub(crate) http: OverlayHttp,
    vs_currency: String,
    /// Shared across pollers so one metadata fetch serves every widget.
    rarity: Arc<RarityResolver>,
}

impl OverlayClient {
    pub fn builder() -> OverlayClientBuilder {
        OverlayClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn market(&self) -> MarketData<'_> {
        MarketData { client: self }
    }

    pub fn sales(&self) -> Sales<'_> {
        Sales { client: self }
    }

    /// The process-lifetime rarity cache.
    pub fn rarity(&self) -> &RarityResolver {
        &self.rarity
    }

    pub(crate) fn vs_currency(&self) -> &str {
        &self.vs_currency
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct OverlayClientBuilder {
    market_base_url: String,
    marketplace_base_url: String,
    market_api_key: Option<String>,
    marketplace_api_key: Option<String>,
    vs_currency: String,
}

impl Default for OverlayClientBuilder {
    fn default() -> Self {
        Self {
            market_base_url: DEFAULT_MARKET_API_URL.to_string(),
            marketplace_base_url: DEFAULT_MARKETPLACE_API_URL.to_string(),
            market_api_key: None,
            marketplace_api_key: None,
            vs_currency: "usd".to_string(),
        }
    }
}

impl OverlayClientBuilder {
    pub fn market_base_url(mut self, url: impl Into<String>) -> Self {
        self.market_base_url = url.into();
        self
    }

    pub fn marketplace_base_url(mut self, url: impl Into<String>) -> Self {
        self.marketplace_base_url = url.into();
        self
    }

    /// Optional — without a key the market provider's public tier is used.
    pub fn market_api_key(mut self, key: impl Into<String>) -> Self {
        self.market_api_key = Some(key.into());
        self
    }

    /// Required for direct marketplace access (the proxy enforces this).
    pub fn marketplace_api_key(mut self, key: impl Into<String>) -> Self {
        self.marketplace_api_key = Some(key.into());
        self
    }

    pub fn vs_currency(mut self, currency: impl Into<String>) -> Self {
        self.vs_currency = currency.into();
        self
    }

    pub fn build(self) -> Result<OverlayClient, OverlayError> {
        if self.market_base_url.is_empty() || self.marketplace_base_url.is_empty() {
            return Err(OverlayError::Config("base URL must not be empty".into()));
        }

        let http = OverlayHttp::new(&self.market_base_url, &self.marketplace_base_url)
            .with_market_api_key(self.market_api_key)
            .with_marketplace_api_key(self.marketplace_api_key);

        Ok(OverlayClient {
            rarity: Arc::new(RarityResolver::new(http.clone())),
            http,
            vs_currency: self.vs_currency,
        })
    }
}
