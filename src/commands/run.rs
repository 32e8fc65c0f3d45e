//! Publish loop command handler.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::chatbox::{HostSampler, OscTransport, Publisher};

use super::resolve_config;

/// Execute the run command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let ticks = matches.get_one::<u64>("ticks").copied();

    // No drain: a signal ends the process right away
    ctrlc::set_handler(|| {
        log::info!("Termination requested, exiting");
        std::process::exit(0);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let transport = OscTransport::connect(&config.destination(), &config.osc_address)
        .with_context(|| format!("Failed to open OSC socket for {}", config.destination()))?;

    log::info!(
        "Starting VRChat OSC system info sender ({} -> {})",
        config.osc_address,
        transport.target()
    );

    let sampler = HostSampler::from_config(&config);
    let mut publisher = Publisher::new(sampler, transport, config.max_length, config.interval());
    let summary = publisher.run(ticks);

    log::info!(
        "Stopped after {} ticks ({} failed sends)",
        summary.ticks,
        summary.failed_sends
    );
    Ok(())
}
