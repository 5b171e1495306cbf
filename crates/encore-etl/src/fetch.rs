//! Fetching the four catalog collections.
//!
//! The catalog source publishes artists as a bare JSON array and the
//! location, date, and relation collections wrapped in `{"index": [...]}`.
//! [`DatasetAggregator::aggregate`] fetches all four concurrently and
//! either returns a complete [`Catalog`] or the first failure.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use encore_core::model::Index;
use encore_core::{Artist, Catalog, DateRecord, LocationRecord, RelationRecord};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};

/// The four resources served by the catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Artists,
    Locations,
    Dates,
    Relations,
}

impl Resource {
    pub const ALL: [Self; 4] = [Self::Artists, Self::Locations, Self::Dates, Self::Relations];

    /// Path segment under the catalog base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Artists => "artists",
            Self::Locations => "locations",
            Self::Dates => "dates",
            Self::Relations => "relation",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Somewhere the raw JSON documents come from.
#[async_trait]
pub trait CatalogSource: Send + Sync + fmt::Debug {
    async fn fetch_document(&self, resource: Resource) -> FetchResult<String>;
}

/// Catalog source reached over unauthenticated HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    http: Client,
    base_url: String,
}

impl HttpCatalogSource {
    /// Create a new HTTP catalog source.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| FetchError::Http {
                resource: String::from("client"),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_document(&self, resource: Resource) -> FetchResult<String> {
        let url = self.url(resource);
        log::debug!("Fetching {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| FetchError::Http {
            resource: resource.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Http {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}

/// Loads the complete catalog from a [`CatalogSource`].
#[derive(Debug, Clone)]
pub struct DatasetAggregator<S = HttpCatalogSource> {
    source: S,
}

impl DatasetAggregator<HttpCatalogSource> {
    /// Build an aggregator over the configured HTTP catalog source.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> FetchResult<Self> {
        let source = HttpCatalogSource::new(&config.catalog_base_url, config.request_timeout())?;
        Ok(Self::new(source))
    }
}

impl<S: CatalogSource> DatasetAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch all four collections.
    ///
    /// The fetches run concurrently; the first failure is returned and
    /// nothing else is kept. No retry happens here.
    ///
    /// # Errors
    /// Returns the first [`FetchError`], or [`FetchError::Empty`] when the
    /// source has no artists.
    pub async fn aggregate(&self) -> FetchResult<Catalog> {
        let (artists, locations, dates, relations) = tokio::try_join!(
            self.fetch::<Vec<Artist>>(Resource::Artists),
            self.fetch::<Index<LocationRecord>>(Resource::Locations),
            self.fetch::<Index<DateRecord>>(Resource::Dates),
            self.fetch::<Index<RelationRecord>>(Resource::Relations),
        )?;

        if artists.is_empty() {
            return Err(FetchError::Empty);
        }

        let catalog = Catalog::new(
            artists,
            locations.into_inner(),
            dates.into_inner(),
            relations.into_inner(),
        );
        log::info!(
            "Loaded catalog: {} artists, {} location records, {} date records, {} relation records",
            catalog.len(),
            catalog.locations().len(),
            catalog.dates().len(),
            catalog.relations().len()
        );
        Ok(catalog)
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: Resource) -> FetchResult<T> {
        let body = self.source.fetch_document(resource).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Default)]
    struct MemorySource {
        documents: HashMap<Resource, String>,
        missing_status: u16,
        calls: AtomicUsize,
    }

    impl MemorySource {
        fn complete() -> Self {
            let mut documents = HashMap::new();
            documents.insert(
                Resource::Artists,
                String::from(r#"[{"id": 1, "name": "Queen", "creationDate": 1970}]"#),
            );
            documents.insert(
                Resource::Locations,
                String::from(r#"{"index": [{"id": 1, "locations": ["lima-peru"], "dates": ""}]}"#),
            );
            documents.insert(
                Resource::Dates,
                String::from(r#"{"index": [{"id": 1, "dates": ["01-02-2019"]}]}"#),
            );
            documents.insert(
                Resource::Relations,
                String::from(r#"{"index": [{"id": 1, "datesLocations": {"lima-peru": ["01-02-2019"]}}]}"#),
            );
            Self {
                documents,
                missing_status: 404,
                calls: AtomicUsize::new(0),
            }
        }

        fn without(mut self, resource: Resource) -> Self {
            self.documents.remove(&resource);
            self
        }

        fn with(mut self, resource: Resource, body: &str) -> Self {
            self.documents.insert(resource, body.to_string());
            self
        }
    }

    #[async_trait]
    impl CatalogSource for MemorySource {
        async fn fetch_document(&self, resource: Resource) -> FetchResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.documents
                .get(&resource)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    resource: resource.to_string(),
                    status: self.missing_status,
                })
        }
    }

    #[tokio::test]
    async fn test_aggregate_complete_catalog() {
        let aggregator = DatasetAggregator::new(MemorySource::complete());
        let catalog = aggregator.aggregate().await.unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.locations()[0].locations, vec!["lima-peru"]);
        assert!(catalog.validate().is_ok());
    }

    #[tokio::test]
    async fn test_any_failed_resource_fails_aggregate() {
        for resource in Resource::ALL {
            let aggregator = DatasetAggregator::new(MemorySource::complete().without(resource));
            let err = aggregator.aggregate().await.unwrap_err();
            match err {
                FetchError::Status { resource: r, status } => {
                    assert_eq!(r, resource.path());
                    assert_eq!(status, 404);
                }
                other => panic!("expected status error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_malformed_document_is_decode_error() {
        let source = MemorySource::complete().with(Resource::Dates, r#"{"index": "nope"}"#);
        let err = DatasetAggregator::new(source).aggregate().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { ref resource, .. } if resource == "dates"));
    }

    #[tokio::test]
    async fn test_empty_artist_collection_is_fatal() {
        let source = MemorySource::complete().with(Resource::Artists, "[]");
        let err = DatasetAggregator::new(source).aggregate().await.unwrap_err();
        assert!(matches!(err, FetchError::Empty));
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let aggregator =
            DatasetAggregator::new(MemorySource::complete().without(Resource::Artists));
        assert!(aggregator.aggregate().await.is_err());
        assert!(aggregator.source().calls.load(Ordering::SeqCst) <= Resource::ALL.len());
    }

    #[test]
    fn test_resource_paths() {
        let source = HttpCatalogSource::new("https://example.org/api/", Duration::from_secs(5))
            .unwrap();
        assert_eq!(source.url(Resource::Artists), "https://example.org/api/artists");
        assert_eq!(source.url(Resource::Relations), "https://example.org/api/relation");
    }
}
