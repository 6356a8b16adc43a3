//! Credential-attaching pass-through proxy.
//!
//! One GET route per upstream. Each handler attaches the provider credential,
//! forwards the caller's query parameters, and relays the upstream status and
//! JSON as-is — no caching, no transformation, no rate limiting. Browser
//! overlays fetch through this so API keys never reach the page.

use crate::network::{
    DEFAULT_MARKETPLACE_API_URL, DEFAULT_MARKET_API_URL, MARKETPLACE_API_KEY_HEADER,
    MARKET_API_KEY_HEADER,
};

use axum::extract::{Query, State};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Proxy configuration: upstream bases plus credentials.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub market_base_url: String,
    pub marketplace_base_url: String,
    /// Optional; without it the market upstream serves its public tier.
    pub market_api_key: Option<String>,
    /// Required for the sales route — requests fail closed without it.
    pub marketplace_api_key: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            market_base_url: DEFAULT_MARKET_API_URL.to_string(),
            marketplace_base_url: DEFAULT_MARKETPLACE_API_URL.to_string(),
            market_api_key: None,
            marketplace_api_key: None,
        }
    }
}

impl ProxyConfig {
    /// Read credentials from `MARKET_API_KEY` / `MARKETPLACE_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            market_api_key: std::env::var("MARKET_API_KEY").ok(),
            marketplace_api_key: std::env::var("MARKETPLACE_API_KEY").ok(),
            ..Self::default()
        }
    }
}

struct ProxyState {
    config: ProxyConfig,
    client: reqwest::Client,
}

/// Build the proxy router with both upstream routes.
pub fn router(config: ProxyConfig) -> Router {
    let state = Arc::new(ProxyState {
        config,
        client: reqwest::Client::new(),
    });
    Router::new()
        .route("/api/market-chart", get(market_chart).options(preflight))
        .route(
            "/api/collection-sales",
            get(collection_sales).options(preflight),
        )
        .with_state(state)
}

type ProxyResponse = (StatusCode, [(HeaderName, HeaderValue); 2], String);

fn json_response(status: StatusCode, body: String) -> ProxyResponse {
    (
        status,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ),
        ],
        body,
    )
}

async fn preflight() -> (StatusCode, [(HeaderName, HeaderValue); 3]) {
    (
        StatusCode::OK,
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, OPTIONS"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ),
        ],
    )
}

async fn market_chart(
    State(state): State<Arc<ProxyState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ProxyResponse {
    let Some(id) = params.get("id") else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({"error": "Missing id parameter"}).to_string(),
        );
    };
    let vs_currency = params.get("vs_currency").map(String::as_str).unwrap_or("usd");
    let days = params
        .get("days")
        .and_then(|d| d.parse::<u32>().ok())
        .unwrap_or(7);

    let mut url = format!(
        "{}/coins/{}/market_chart?vs_currency={}&days={}",
        state.config.market_base_url,
        urlencoding::encode(id),
        urlencoding::encode(vs_currency),
        days
    );
    if let Some(interval) = params.get("interval") {
        url = format!("{}&interval={}", url, urlencoding::encode(interval));
    }

    let mut req = state.client.get(&url).header("Accept", "application/json");
    // Key is optional here — the upstream falls back to its public tier.
    if let Some(key) = &state.config.market_api_key {
        req = req.header(MARKET_API_KEY_HEADER, key);
    }
    forward(req).await
}

async fn collection_sales(
    State(state): State<Arc<ProxyState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ProxyResponse {
    // Fail closed: this upstream is useless without a credential.
    let Some(key) = &state.config.marketplace_api_key else {
        return json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Server misconfigured: no API key"}).to_string(),
        );
    };
    let Some(collection) = params.get("collection") else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({"error": "Missing collection parameter"}).to_string(),
        );
    };
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<u32>().ok())
        .unwrap_or(10)
        .min(50);

    let url = format!(
        "{}/events/collection/{}?event_type=sale&limit={}",
        state.config.marketplace_base_url,
        urlencoding::encode(collection),
        limit
    );

    let req = state
        .client
        .get(&url)
        .header("Accept", "application/json")
        .header(MARKETPLACE_API_KEY_HEADER, key);
    forward(req).await
}

/// Relay an upstream response: status verbatim, body verbatim on success,
/// wrapped detail on upstream error, 502 on transport failure.
async fn forward(req: reqwest::RequestBuilder) -> ProxyResponse {
    match req.send().await {
        Ok(resp) => {
            let status = StatusCode::from_u16(resp.status().as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let body = resp.text().await.unwrap_or_default();
            if status.is_success() {
                json_response(status, body)
            } else {
                tracing::error!(status = status.as_u16(), "upstream error");
                json_response(
                    status,
                    json!({"error": "Upstream error", "detail": body}).to_string(),
                )
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "proxy transport failure");
            json_response(
                StatusCode::BAD_GATEWAY,
                json!({"error": "Bad gateway", "detail": err.to_string()}).to_string(),
            )
        }
    }
}
