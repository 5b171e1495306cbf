//! Location geocoding: normalization, a shared coordinate cache, a
//! retrying provider client, and the read-through resolver that ties
//! them together.

pub mod cache;
pub mod client;
pub mod resolver;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use encore_core::Coordinate;

use crate::error::GeocodeResult;

pub use cache::GeocodeCache;
pub use client::{GeocodeClient, GeocodeTransport, MapboxTransport};
pub use resolver::GeocodeResolver;

/// Anything that can turn a normalized location into a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync + std::fmt::Debug {
    /// Look up one normalized location.
    ///
    /// Implementations should stop early with
    /// [`GeocodeError::Cancelled`](crate::error::GeocodeError::Cancelled)
    /// once `cancel` fires.
    async fn geocode(&self, query: &str, cancel: &CancellationToken)
        -> GeocodeResult<Coordinate>;
}

/// Turns a raw catalog token into the text sent to the provider.
///
/// `-` separates place from region and becomes `", "`; `_` stands in for
/// a space. `"auckland-new_zealand"` becomes `"auckland, new zealand"`.
pub fn normalize_location(raw: &str) -> String {
    raw.replace('-', ", ").replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_location() {
        assert_eq!(normalize_location("auckland-new_zealand"), "auckland, new zealand");
        assert_eq!(
            normalize_location("playa_del_carmen-mexico"),
            "playa del carmen, mexico"
        );
        assert_eq!(normalize_location("london-uk"), "london, uk");
        assert_eq!(normalize_location("paris"), "paris");
    }
}
