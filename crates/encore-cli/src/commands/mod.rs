pub mod artists;
pub mod config;
pub mod search;
pub mod show;

use anyhow::{Context, Result};
use encore_core::Catalog;
use encore_etl::{Config, DatasetAggregator};

pub use artists::list_artists;
pub use search::run_search;
pub use show::show_artist;

/// Fetch the catalog snapshot every command works from.
pub async fn load_catalog(config: &Config) -> Result<Catalog> {
    let aggregator = DatasetAggregator::from_config(config)?;
    let catalog = aggregator
        .aggregate()
        .await
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_base_url))?;

    if let Err(e) = catalog.validate() {
        log::warn!("Catalog collections are misaligned: {}", e);
    }

    Ok(catalog)
}
