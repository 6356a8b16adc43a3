//! # overlay-engine
//!
//! Data engine for a browser-based live market overlay (streaming/OBS use):
//! polls a cryptocurrency market-data API and an NFT marketplace sales API,
//! derives rolling statistics over bounded in-memory windows, and emits
//! structured view models plus SVG sparkline markup for a thin display layer.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, derivation (always available)
//! 2. **Render** — Sparkline geometry + SVG emission, escaped view models
//! 3. **HTTP** — `OverlayHttp` with per-endpoint retry policies
//! 4. **Pollers** — Timer-driven fetch→derive→render cycles with tick gates
//! 5. **Proxy** — Credential-attaching pass-through routes (server side)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use overlay_engine::prelude::*;
//!
//! let client = OverlayClient::builder()
//!     .marketplace_api_key(std::env::var("MARKETPLACE_API_KEY")?)
//!     .build()?;
//!
//! let config = OverlayConfig::default();
//! let (tx, mut rx) = tokio::sync::mpsc::channel(8);
//! tokio::spawn(MetricsPoller::new(client.clone(), config.market).run(tx));
//! while let Some(view) = rx.recv().await {
//!     println!("{} {}", view.price, view.change_label);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified crate error types.
pub mod error;

/// Upstream base URL constants.
pub mod network;

/// Poller and widget configuration.
pub mod config;

// ── Layer 2: Render ──────────────────────────────────────────────────────────

/// Sparkline SVG emission and display view models.
pub mod render;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

/// `OverlayClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Pollers ─────────────────────────────────────────────────────────

/// Timer-driven poll cycles with in-flight guards.
#[cfg(feature = "poller")]
pub mod poller;

// ── Layer 5: Proxy ───────────────────────────────────────────────────────────

/// Credential-attaching pass-through proxy routes.
#[cfg(feature = "proxy")]
pub mod proxy;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, ChangeWindow, CollectionSlug, Trend};

    // Domain types — market
    pub use crate::domain::market::{
        CoinListRow, LiveSampleBuffer, MarketChart, MarketSnapshot, SeriesPoint, SpotMetrics,
        WindowChange,
    };

    // Domain types — sales
    pub use crate::domain::sales::{
        filter_window, max_by_price, session_high, NftAsset, Payment, SaleAnimationTracker,
        SaleEvent,
    };

    // Domain types — rarity
    pub use crate::domain::rarity::{RarityClass, RarityInfo};
    #[cfg(feature = "http")]
    pub use crate::domain::rarity::RarityResolver;

    // Render
    pub use crate::render::{
        sanitize, CoinRowView, HighCard, MetricsView, SaleCard, SalesView, SparklineOptions,
    };

    // Config
    pub use crate::config::{AllTimeHighConfig, MarketPollConfig, OverlayConfig, SalesPollConfig};

    // Errors
    pub use crate::error::{HttpError, OverlayError};

    // Network
    pub use crate::network::{DEFAULT_MARKETPLACE_API_URL, DEFAULT_MARKET_API_URL};

    // HTTP client
    #[cfg(feature = "http")]
    pub use crate::client::{OverlayClient, OverlayClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::{OverlayHttp, RetryConfig, RetryPolicy};

    // Pollers
    #[cfg(feature = "poller")]
    pub use crate::poller::{CycleOutcome, MetricsPoller, PollPhase, SalesPoller};

    // Proxy
    #[cfg(feature = "proxy")]
    pub use crate::proxy::{router as proxy_router, ProxyConfig};
}
