use anyhow::Result;
use clap::ArgMatches;

use crate::core::chatbox::{render_message, HostSampler, Sampler};

use super::resolve_config;

/// Sample the host once and print the message that would be sent
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let mut sampler = HostSampler::from_config(&config);

    let message = render_message(&sampler.sample(), config.max_length);

    println!("{}", message);
    println!();
    println!(
        "({} / {} characters, not sent)",
        message.chars().count(),
        config.max_length
    );
    Ok(())
}
