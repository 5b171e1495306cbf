use anyhow::Result;
use encore_etl::Config;

use super::load_catalog;

pub async fn list_artists(config: &Config) -> Result<()> {
    let catalog = load_catalog(config).await?;

    println!("\n🎤 {} artists\n", catalog.len());
    for artist in catalog.artists() {
        println!("  {:>3}  {} ({})", artist.id, artist.name, artist.creation_date);
    }

    Ok(())
}
