//! Sales sub-client — recent collection sales.

use crate::client::OverlayClient;
use crate::domain::sales::SaleEvent;
use crate::error::OverlayError;
use crate::shared::CollectionSlug;

/// Sub-client for marketplace events provider operations.
pub struct Sales<'a> {
    pub(crate) client: &'a OverlayClient,
}

impl<'a> Sales<'a> {
    /// Fetch the most recent sales for a collection, canonicalized.
    ///
    /// `limit` is clamped to the provider maximum of 50.
    pub async fn recent(
        &self,
        collection: &CollectionSlug,
        limit: u32,
    ) -> Result<Vec<SaleEvent>, OverlayError> {
        let envelope = self
            .client
            .http
            .get_collection_sales(collection.as_str(), limit)
            .await?;
        Ok(envelope
            .into_events()
            .into_iter()
            .map(SaleEvent::from)
            .collect())
    }
}
