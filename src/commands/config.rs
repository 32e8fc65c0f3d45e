use anyhow::{Context, Result};
use clap::ArgMatches;

use super::resolve_config;

/// Print the configuration the publisher would run with
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{}", json);
    Ok(())
}
