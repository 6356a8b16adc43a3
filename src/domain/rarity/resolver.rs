//! Cached rarity resolution backed by metadata fetches.

use super::{cache_key, rarity_from_document, RarityInfo};
use crate::domain::sales::NftAsset;
use crate::http::OverlayHttp;

use async_lock::RwLock;
use std::collections::HashMap;

/// Resolves and memoizes the rarity of an NFT.
///
/// Each unique cache key is fetched at most once per process; failures are
/// cached as "no rarity" rather than retried, which bounds metadata traffic
/// at the cost of missing the occasional transient failure.
pub struct RarityResolver {
    http: OverlayHttp,
    cache: RwLock<HashMap<String, Option<RarityInfo>>>,
}

impl RarityResolver {
    pub fn new(http: OverlayHttp) -> Self {
        Self {
            http,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the rarity for an NFT, hitting the network at most once per
    /// key. Uncacheable items (no metadata URL and no collection:id pair)
    /// resolve to `None` without fetching.
    pub async fn resolve(&self, nft: &NftAsset) -> Option<RarityInfo> {
        let key = cache_key(nft)?;

        if let Some(cached) = self.cache.read().await.get(&key) {
            tracing::debug!(%key, hit = cached.is_some(), "rarity cache hit");
            return cached.clone();
        }

        let result = match nft.metadata_url.as_deref() {
            Some(url) => match self.http.get_nft_metadata(url).await {
                Ok(doc) => rarity_from_document(&doc),
                Err(err) => {
                    tracing::debug!(%key, error = %err, "metadata fetch failed; caching no-rarity");
                    None
                }
            },
            // A collection:id key with no metadata URL has nothing to fetch.
            None => None,
        };

        self.cache.write().await.insert(key, result.clone());
        result
    }

    /// Number of cached entries, including negative ones.
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rarity::RarityClass;

    fn resolver() -> RarityResolver {
        RarityResolver::new(OverlayHttp::new(
            "http://127.0.0.1:9",
            "http://127.0.0.1:9",
        ))
    }

    #[tokio::test]
    async fn test_uncacheable_nft_resolves_none_without_fetch() {
        let r = resolver();
        assert_eq!(r.resolve(&NftAsset::default()).await, None);
        assert_eq!(r.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_no_metadata_url_caches_negative() {
        let r = resolver();
        let nft = NftAsset {
            collection: Some("off-the-grid".to_string()),
            identifier: Some("42".to_string()),
            ..Default::default()
        };
        assert_eq!(r.resolve(&nft).await, None);
        assert_eq!(r.cached_len().await, 1);
        // Second call is a cache hit, still `None`.
        assert_eq!(r.resolve(&nft).await, None);
        assert_eq!(r.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_cached_once() {
        // Port 9 (discard) refuses connections, so the fetch fails fast.
        let r = resolver();
        let nft = NftAsset {
            metadata_url: Some("http://127.0.0.1:9/meta/1".to_string()),
            ..Default::default()
        };
        assert_eq!(r.resolve(&nft).await, None);
        assert_eq!(r.cached_len().await, 1);
        assert_eq!(r.resolve(&nft).await, None);
        assert_eq!(r.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_seeded_cache_short_circuits() {
        let r = resolver();
        let nft = NftAsset {
            metadata_url: Some("https://meta.example/7".to_string()),
            ..Default::default()
        };
        r.cache.write().await.insert(
            "https://meta.example/7".to_string(),
            Some(RarityInfo {
                label: "Epic".to_string(),
                class: RarityClass::Epic,
            }),
        );
        let info = r.resolve(&nft).await.unwrap();
        assert_eq!(info.class, RarityClass::Epic);
    }
}
