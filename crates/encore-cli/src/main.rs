use anyhow::Result;
use clap::Parser;

use encore_etl::Config;

mod commands;
mod logging;

#[derive(Debug, Parser)]
#[command(name = "encore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog source base URL (overrides config and ENCORE_CATALOG_BASE_URL)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List every artist in the catalog
    Artists,
    /// Show one artist with its concert schedule and locations
    ///
    /// Fetches the catalog, joins the artist's location, date, and relation
    /// records, and geocodes each concert location. Geocoding needs a
    /// Mapbox token (ENCORE_MAPBOX_TOKEN or mapbox_token in the config
    /// file); pass --no-geocode to skip it.
    Show {
        /// Artist id (1-based)
        id: i64,

        /// Skip resolving concert locations to coordinates
        #[arg(long)]
        no_geocode: bool,
    },
    /// Search names, members, albums, creation years, and locations
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file if it does not exist
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.catalog_url {
        config.catalog_base_url = url;
    }

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    logging::init(level)?;

    match cli.command {
        Commands::Artists => {
            commands::list_artists(&config).await?;
        }
        Commands::Show { id, no_geocode } => {
            commands::show_artist(&config, id, !no_geocode).await?;
        }
        Commands::Search { query, json } => {
            commands::run_search(&config, &query, json).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show_config(&config)?,
            ConfigCommands::Path => commands::config::show_path()?,
            ConfigCommands::Example => commands::config::show_example()?,
            ConfigCommands::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
