use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use encore_core::Coordinate;

use crate::error::{GeocodeError, GeocodeResult};
use crate::geocode::{normalize_location, GeocodeCache, Geocoder};

/// Cache-first resolution of raw location tokens.
///
/// A hit returns straight from the [`GeocodeCache`]. A miss goes to the
/// [`Geocoder`] and a successful answer is written back before it is
/// returned. Failures are never cached.
#[derive(Debug)]
pub struct GeocodeResolver<G> {
    geocoder: G,
    cache: Arc<GeocodeCache>,
}

impl<G: Geocoder> GeocodeResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self::with_cache(geocoder, Arc::new(GeocodeCache::new()))
    }

    /// Build a resolver sharing an existing cache.
    pub fn with_cache(geocoder: G, cache: Arc<GeocodeCache>) -> Self {
        Self { geocoder, cache }
    }

    pub fn cache(&self) -> &Arc<GeocodeCache> {
        &self.cache
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Resolve one raw location token such as `"auckland-new_zealand"`.
    ///
    /// # Errors
    /// Returns the geocoder's error unchanged, or
    /// [`GeocodeError::Cancelled`] if `cancel` has already fired.
    pub async fn resolve(
        &self,
        raw_location: &str,
        cancel: &CancellationToken,
    ) -> GeocodeResult<Coordinate> {
        let key = normalize_location(raw_location);

        if let Some(coordinate) = self.cache.get(&key) {
            log::debug!("Geocode cache hit for '{}'", key);
            return Ok(coordinate);
        }

        if cancel.is_cancelled() {
            return Err(GeocodeError::Cancelled { location: key });
        }

        let coordinate = self.geocoder.geocode(&key, cancel).await?;
        self.cache.put(key, coordinate);
        Ok(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    #[derive(Debug, Default)]
    struct CountingGeocoder {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(
            &self,
            query: &str,
            _cancel: &CancellationToken,
        ) -> GeocodeResult<Coordinate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(GeocodeError::NoFeatures {
                    location: query.to_string(),
                })
            } else {
                Ok(Coordinate::new(174.76, -36.85))
            }
        }
    }

    #[tokio::test]
    async fn test_second_resolve_hits_cache() {
        let resolver = GeocodeResolver::new(CountingGeocoder::default());
        let cancel = CancellationToken::new();

        let first = resolver.resolve("auckland-new_zealand", &cancel).await.unwrap();
        let second = resolver.resolve("auckland-new_zealand", &cancel).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(resolver.geocoder().calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            resolver.cache().get("auckland, new zealand"),
            Some(Coordinate::new(174.76, -36.85))
        );
    }

    #[tokio::test]
    async fn test_cached_key_needs_no_geocoder_call() {
        let cache = Arc::new(GeocodeCache::new());
        cache.put("lima, peru", Coordinate::new(-77.04, -12.05));
        let resolver = GeocodeResolver::with_cache(CountingGeocoder::default(), cache);

        let coord = resolver
            .resolve("lima-peru", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(coord, Coordinate::new(-77.04, -12.05));
        assert_eq!(resolver.geocoder().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let resolver = GeocodeResolver::new(CountingGeocoder {
            fail: true,
            ..CountingGeocoder::default()
        });
        let cancel = CancellationToken::new();

        assert!(resolver.resolve("atlantis", &cancel).await.is_err());
        assert!(resolver.resolve("atlantis", &cancel).await.is_err());

        assert_eq!(resolver.geocoder().calls.load(Ordering::SeqCst), 2);
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_served_even_when_cancelled() {
        let cache = Arc::new(GeocodeCache::new());
        cache.put("osaka, japan", Coordinate::new(135.5, 34.7));
        let resolver = GeocodeResolver::with_cache(CountingGeocoder::default(), cache);
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(resolver.resolve("osaka-japan", &cancel).await.is_ok());
        let err = resolver.resolve("kyoto-japan", &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(resolver.geocoder().calls.load(Ordering::SeqCst), 0);
    }
}
