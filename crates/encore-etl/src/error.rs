//! Error types for fetching and enrichment.

use thiserror::Error;

/// Errors raised while fetching the catalog collections.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request to the catalog source failed at the transport level.
    #[error("HTTP error fetching {resource}: {message}")]
    Http { resource: String, message: String },

    /// The catalog source answered with a non-success status.
    #[error("{resource} returned status {status}")]
    Status { resource: String, status: u16 },

    /// The document could not be decoded into the expected collection.
    #[error("could not decode {resource}: {message}")]
    Decode { resource: String, message: String },

    /// The artist collection came back empty.
    #[error("catalog source returned no artists")]
    Empty,
}

/// Convenience alias for fetch results.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors raised while geocoding one location.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The request to the provider failed at the transport level.
    #[error("HTTP error geocoding {location}: {message}")]
    Http { location: String, message: String },

    /// The provider answered with a non-success status.
    #[error("geocoding {location} returned status {status}")]
    Status { location: String, status: u16 },

    /// The provider response was not shaped as expected.
    #[error("could not decode geocoding response for {location}: {message}")]
    Decode { location: String, message: String },

    /// The response decoded but held no candidate features.
    #[error("no geocoding candidates for {location}")]
    NoFeatures { location: String },

    /// Every attempt failed.
    #[error("failed to geocode {location} after {attempts} attempts: {last}")]
    Exhausted {
        location: String,
        attempts: usize,
        #[source]
        last: Box<GeocodeError>,
    },

    /// The lookup was abandoned because the enclosing request failed.
    #[error("geocoding {location} was cancelled")]
    Cancelled { location: String },

    /// No provider access token is configured.
    #[error("no geocoding access token configured (set ENCORE_MAPBOX_TOKEN)")]
    MissingToken,
}

impl GeocodeError {
    /// Returns `true` when another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::Decode { .. } | Self::NoFeatures { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Convenience alias for geocoding results.
pub type GeocodeResult<T> = std::result::Result<T, GeocodeError>;

/// Errors surfaced by the enrichment orchestrator.
///
/// The display text is deliberately location-agnostic; the failing lookup
/// is available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("unable to resolve concert locations")]
    Unresolved {
        #[source]
        source: GeocodeError,
    },

    /// A resolution task ended without reporting a result.
    #[error("unable to resolve concert locations")]
    TaskFailed,
}

impl EnrichError {
    /// The geocoding failure behind this error, if any.
    pub fn geocode_error(&self) -> Option<&GeocodeError> {
        match self {
            Self::Unresolved { source } => Some(source),
            Self::TaskFailed => None,
        }
    }
}

/// Convenience alias for enrichment results.
pub type EnrichResult<T> = std::result::Result<T, EnrichError>;
