use anyhow::Result;
use encore_etl::Config;

use super::load_catalog;

pub async fn run_search(config: &Config, query: &str, json: bool) -> Result<()> {
    let catalog = load_catalog(config).await?;
    let hits = encore_search::search(query, catalog.artists(), catalog.relations());

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matches for '{}'", query);
        return Ok(());
    }

    for hit in &hits {
        println!("  [{:>3}] {}", hit.artist_id, hit.label);
    }
    println!("\n{} matches. Run 'encore show <id>' for details.", hits.len());

    Ok(())
}
