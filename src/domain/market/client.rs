//! Market sub-client — chart, spot, and listing queries.

use crate::client::OverlayClient;
use crate::domain::market::{CoinListRow, MarketChart, SpotMetrics};
use crate::error::OverlayError;
use crate::shared::AssetId;

/// Sub-client for market-data provider operations.
pub struct MarketData<'a> {
    pub(crate) client: &'a OverlayClient,
}

impl<'a> MarketData<'a> {
    /// Fetch the chart series for one asset over `lookback_days` days.
    pub async fn chart(
        &self,
        asset_id: &AssetId,
        lookback_days: u32,
    ) -> Result<MarketChart, OverlayError> {
        let resp = self
            .client
            .http
            .get_market_chart(
                asset_id.as_str(),
                self.client.vs_currency(),
                lookback_days,
                Some("hourly"),
            )
            .await?;
        Ok(resp.into())
    }

    /// Fetch spot metrics from the coin document.
    pub async fn spot(&self, asset_id: &AssetId) -> Result<SpotMetrics, OverlayError> {
        let resp = self.client.http.get_coin(asset_id.as_str()).await?;
        Ok(resp.into())
    }

    /// Fetch one listing row per asset, with 1H change where available.
    pub async fn list(&self, asset_ids: &[AssetId]) -> Result<Vec<CoinListRow>, OverlayError> {
        let ids: Vec<&str> = asset_ids.iter().map(|a| a.as_str()).collect();
        let resp = self
            .client
            .http
            .get_coins_markets(&ids, self.client.vs_currency())
            .await?;
        Ok(resp.into_iter().map(CoinListRow::from).collect())
    }
}
