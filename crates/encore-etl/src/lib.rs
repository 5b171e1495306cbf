//! Catalog fetching and location enrichment for encore.
//!
//! Implements the dataset aggregator that loads the four catalog
//! collections, and the geocoding stack (cache, retrying client,
//! read-through resolver) driven concurrently by the enrichment
//! orchestrator.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod geocode;
pub mod resilience;

pub use config::Config;
pub use enrich::EnrichmentOrchestrator;
pub use error::{
    EnrichError, EnrichResult, FetchError, FetchResult, GeocodeError, GeocodeResult,
};
pub use fetch::{CatalogSource, DatasetAggregator, HttpCatalogSource, Resource};
pub use geocode::{
    normalize_location, GeocodeCache, GeocodeClient, GeocodeResolver, GeocodeTransport, Geocoder,
    MapboxTransport,
};
pub use resilience::RetryPolicy;

/// User agent sent with every outbound request.
pub(crate) const USER_AGENT: &str = concat!("encore/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_crate_version() {
        assert_eq!(USER_AGENT, format!("encore/{}", env!("CARGO_PKG_VERSION")));
        assert!(!USER_AGENT.contains("http"));
    }
}
