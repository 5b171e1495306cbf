//! Geocoding provider client.
//!
//! [`MapboxTransport`] performs exactly one request against the provider.
//! [`GeocodeClient`] wraps any [`GeocodeTransport`] in the fixed-interval
//! [`RetryPolicy`] and honours a cancellation token between and during
//! attempts.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use encore_core::Coordinate;

use crate::error::{GeocodeError, GeocodeResult};
use crate::geocode::Geocoder;
use crate::resilience::RetryPolicy;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    center: Vec<f64>,
}

/// One geocoding request, no retry.
#[async_trait]
pub trait GeocodeTransport: Send + Sync + fmt::Debug {
    async fn lookup(&self, query: &str) -> GeocodeResult<Coordinate>;
}

/// Mapbox forward-geocoding transport.
///
/// Requests `{base}/{url-encoded query}.json?access_token={token}` and
/// reads `features[0].center`.
#[derive(Clone)]
pub struct MapboxTransport {
    http: Client,
    base_url: String,
    access_token: String,
}

impl fmt::Debug for MapboxTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxTransport")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl MapboxTransport {
    /// Create a new Mapbox transport.
    ///
    /// # Errors
    /// Returns [`GeocodeError::MissingToken`] for an empty token and
    /// [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> GeocodeResult<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(GeocodeError::MissingToken);
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| GeocodeError::Http {
                location: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// The request URL for `query`, without the access token.
    pub fn endpoint(&self, query: &str) -> String {
        format!("{}/{}.json", self.base_url, urlencoding::encode(query))
    }
}

#[async_trait]
impl GeocodeTransport for MapboxTransport {
    async fn lookup(&self, query: &str) -> GeocodeResult<Coordinate> {
        let response = self
            .http
            .get(self.endpoint(query))
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| GeocodeError::Http {
                location: query.to_string(),
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status {
                location: query.to_string(),
                status: status.as_u16(),
            });
        }

        let body: GeocodeResponse = response.json().await.map_err(|e| GeocodeError::Decode {
            location: query.to_string(),
            message: e.without_url().to_string(),
        })?;

        first_center(query, &body)
    }
}

fn first_center(query: &str, body: &GeocodeResponse) -> GeocodeResult<Coordinate> {
    let feature = body.features.first().ok_or_else(|| GeocodeError::NoFeatures {
        location: query.to_string(),
    })?;

    Coordinate::from_center(&feature.center).ok_or_else(|| GeocodeError::Decode {
        location: query.to_string(),
        message: format!("center has {} values, expected 2", feature.center.len()),
    })
}

/// Retrying geocoding client.
///
/// Transient failures (transport errors, non-success statuses, bad bodies,
/// empty feature lists) are retried under the [`RetryPolicy`]; once
/// attempts run out the last failure is wrapped in
/// [`GeocodeError::Exhausted`].
#[derive(Debug, Clone)]
pub struct GeocodeClient<T = MapboxTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: GeocodeTransport> GeocodeClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn lookup_with_retry(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> GeocodeResult<Coordinate> {
        let attempts = AtomicUsize::new(0);
        let counter = &attempts;
        let transport = &self.transport;

        let attempt = move || async move {
            if cancel.is_cancelled() {
                return Err(cancelled(query));
            }
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            log::debug!("Geocoding '{}' (attempt {})", query, n);

            let result = transport.lookup(query).await;
            if cancel.is_cancelled() {
                return Err(cancelled(query));
            }
            result
        };

        let retrying = attempt
            .retry(self.policy.backoff())
            .sleep(tokio::time::sleep)
            .when(GeocodeError::is_transient)
            .notify(|err: &GeocodeError, pause: Duration| {
                log::warn!("Geocoding attempt failed: {}; retrying in {:?}", err, pause);
            });

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(cancelled(query)),
            result = retrying => result,
        };

        outcome.map_err(|err| {
            if err.is_transient() {
                GeocodeError::Exhausted {
                    location: query.to_string(),
                    attempts: attempts.load(Ordering::SeqCst),
                    last: Box::new(err),
                }
            } else {
                err
            }
        })
    }
}

fn cancelled(query: &str) -> GeocodeError {
    GeocodeError::Cancelled {
        location: query.to_string(),
    }
}

#[async_trait]
impl<T: GeocodeTransport> Geocoder for GeocodeClient<T> {
    async fn geocode(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> GeocodeResult<Coordinate> {
        self.lookup_with_retry(query, cancel).await
    }
}
