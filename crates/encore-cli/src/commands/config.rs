use anyhow::Result;
use encore_etl::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let path = config::config_file_path();
    println!("Config file: {}", path.display());
    println!("File exists: {}\n", if path.exists() { "yes" } else { "no (using defaults)" });

    let mut shown = config.clone();
    if shown.mapbox_token.is_some() {
        shown.mapbox_token = Some(String::from("<set>"));
    }
    print!("{}", toml::to_string_pretty(&shown)?);

    println!("\nPriority: CLI args > ENV vars (ENCORE_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to add your Mapbox token.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
