use std::collections::HashMap;

use anyhow::Result;
use encore_core::{ArtistId, DetailRecord, ResolvedLocation};
use encore_etl::{Config, EnrichmentOrchestrator, GeocodeError};

use super::load_catalog;

pub async fn show_artist(config: &Config, id: i64, geocode: bool) -> Result<()> {
    let catalog = load_catalog(config).await?;

    let detail = match catalog.join(ArtistId::new(id)) {
        Ok(detail) => detail,
        Err(e) if e.is_not_found() => {
            println!("No artist with id {} (catalog has {} artists)", id, catalog.len());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    log::debug!("Joined artist {}: {}", id, detail.artist.name);
    print_detail(&detail);

    if !geocode {
        return Ok(());
    }

    let orchestrator = match EnrichmentOrchestrator::from_config(config) {
        Ok(orchestrator) => orchestrator,
        Err(GeocodeError::MissingToken) => {
            println!("\nSkipping coordinates: no Mapbox token configured.");
            println!("Set ENCORE_MAPBOX_TOKEN or run 'encore config init'.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match orchestrator.enrich_detail(&detail).await {
        Ok(resolved) => print_coordinates(&detail, &resolved),
        Err(e) => {
            log::debug!("Enrichment failure: {:?}", e);
            println!("\n⚠ {}", e);
        }
    }

    Ok(())
}

fn print_detail(detail: &DetailRecord) {
    let artist = &detail.artist;
    println!("\n{}", artist.name);
    println!("{}\n", "=".repeat(artist.name.chars().count()));
    println!("  Created:     {}", artist.creation_date);
    println!("  First album: {}", artist.first_album);
    if !artist.members.is_empty() {
        println!("  Members:     {}", artist.members.join(", "));
    }

    let schedule = detail.schedule();
    if !schedule.is_empty() {
        println!("\n  Concerts:");
        for entry in schedule {
            println!("    {:<12} {}", entry.date, entry.location);
        }
    }
}

fn print_coordinates(detail: &DetailRecord, resolved: &[ResolvedLocation]) {
    let by_location: HashMap<&str, &ResolvedLocation> = resolved
        .iter()
        .map(|r| (r.location.as_str(), r))
        .collect();

    println!("\n  Locations:");
    for token in detail.location_tokens() {
        if let Some(r) = by_location.get(token.as_str()) {
            println!(
                "    {:<32} {:>10.4}, {:>10.4}",
                token, r.coordinate.latitude, r.coordinate.longitude
            );
        }
    }
}
