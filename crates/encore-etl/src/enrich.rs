//! Concurrent geocoding of an artist's concert locations.
//!
//! [`EnrichmentOrchestrator::enrich`] spawns one resolution task per
//! location and collects the outcomes from two channels, one for
//! coordinates and one for failures. The first failure wins: the shared
//! cancellation token is fired so in-flight lookups stop, and the error is
//! returned without waiting for the rest.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use encore_core::{DetailRecord, ResolvedLocation};

use crate::config::Config;
use crate::error::{EnrichError, EnrichResult, GeocodeError, GeocodeResult};
use crate::geocode::{GeocodeClient, GeocodeResolver, Geocoder, MapboxTransport};

/// Fans location lookups out over a shared [`GeocodeResolver`].
#[derive(Debug)]
pub struct EnrichmentOrchestrator<G> {
    resolver: Arc<GeocodeResolver<G>>,
}

impl<G> Clone for EnrichmentOrchestrator<G> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl EnrichmentOrchestrator<GeocodeClient<MapboxTransport>> {
    /// Build an orchestrator backed by the Mapbox provider.
    ///
    /// # Errors
    /// Returns [`GeocodeError::MissingToken`] when no token is configured.
    pub fn from_config(config: &Config) -> GeocodeResult<Self> {
        let token = config
            .mapbox_token
            .as_deref()
            .ok_or(GeocodeError::MissingToken)?;
        let transport =
            MapboxTransport::new(&config.geocode_base_url, token, config.request_timeout())?;
        let client = GeocodeClient::new(transport, config.retry_policy());
        Ok(Self::new(Arc::new(GeocodeResolver::new(client))))
    }
}

impl<G: Geocoder + 'static> EnrichmentOrchestrator<G> {
    pub fn new(resolver: Arc<GeocodeResolver<G>>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<GeocodeResolver<G>> {
        &self.resolver
    }

    /// Resolve the locations of a joined detail record.
    pub async fn enrich_detail(&self, detail: &DetailRecord) -> EnrichResult<Vec<ResolvedLocation>> {
        self.enrich(detail.location_tokens()).await
    }

    /// Resolve every location, or fail with the first error.
    ///
    /// Results come back in completion order; match on
    /// [`ResolvedLocation::location`] to pair them with the input.
    ///
    /// # Errors
    /// [`EnrichError::Unresolved`] carrying the first geocoding failure, or
    /// [`EnrichError::TaskFailed`] if a task ended without reporting.
    pub async fn enrich(&self, locations: &[String]) -> EnrichResult<Vec<ResolvedLocation>> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let cancel = CancellationToken::new();
        // Cancels the tasks if this future is dropped before finishing.
        let _guard = cancel.clone().drop_guard();

        let expected = locations.len();
        let (ok_tx, mut ok_rx) = mpsc::channel::<ResolvedLocation>(expected);
        let (err_tx, mut err_rx) = mpsc::channel::<GeocodeError>(expected);

        for location in locations {
            let resolver = Arc::clone(&self.resolver);
            let cancel = cancel.clone();
            let ok_tx = ok_tx.clone();
            let err_tx = err_tx.clone();
            let location = location.clone();

            tokio::spawn(async move {
                match resolver.resolve(&location, &cancel).await {
                    Ok(coordinate) => {
                        let resolved = ResolvedLocation {
                            location,
                            coordinate,
                        };
                        if ok_tx.send(resolved).await.is_err() {
                            log::debug!("Enrichment already finished; dropping result");
                        }
                    }
                    Err(err) => {
                        if err_tx.send(err).await.is_err() {
                            log::debug!("Enrichment already finished; dropping error");
                        }
                    }
                }
            });
        }
        drop(ok_tx);
        drop(err_tx);

        let mut resolved = Vec::with_capacity(expected);
        for _ in 0..expected {
            tokio::select! {
                Some(location) = ok_rx.recv() => resolved.push(location),
                Some(err) = err_rx.recv() => {
                    cancel.cancel();
                    log::warn!("Location enrichment failed: {}", err);
                    return Err(EnrichError::Unresolved { source: err });
                }
                else => {
                    cancel.cancel();
                    log::error!("A location task ended without reporting a result");
                    return Err(EnrichError::TaskFailed);
                }
            }
        }

        log::debug!("Resolved {} locations", resolved.len());
        Ok(resolved)
    }
}
