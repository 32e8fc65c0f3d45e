// Command handlers module
pub mod completions;
pub mod config;
pub mod preview;
pub mod run;
pub mod version;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use crate::core::config::{Config, GpuMemoryReport, MediaCapPolicy};

// Re-exports for cleaner imports
pub use preview::execute as preview;
pub use run::execute as run;
pub use version::execute as version;

/// Build the full command-line interface
pub fn build_cli() -> Command {
    Command::new("vrcstat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Publishes host telemetry to the VRChat chatbox over OSC")
        .args(run_args())
        .args_conflicts_with_subcommands(true)
        .subcommand(
            Command::new("run")
                .about("Sample and publish on a fixed cadence (default)")
                .args(run_args()),
        )
        .subcommand(
            Command::new("preview")
                .about("Sample once and print the message without sending it")
                .args(config_args()),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration as JSON")
                .args(config_args()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

/// Flags of the publish loop; also accepted without the `run` subcommand
fn run_args() -> Vec<Arg> {
    let mut args = config_args();
    args.push(
        Arg::new("ticks")
            .long("ticks")
            .value_name("N")
            .help("Stop after N ticks instead of running forever")
            .value_parser(clap::value_parser!(u64)),
    );
    args
}

/// Flags that override the configuration file
fn config_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .value_name("FILE")
            .help("Configuration file (JSON)")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("host")
            .long("host")
            .value_name("HOST")
            .help("Chatbox OSC host"),
        Arg::new("port")
            .short('p')
            .long("port")
            .value_name("PORT")
            .help("Chatbox OSC port")
            .value_parser(clap::value_parser!(u16)),
        Arg::new("interval-ms")
            .long("interval-ms")
            .value_name("MS")
            .help("Pause between messages in milliseconds")
            .value_parser(clap::value_parser!(u64)),
        Arg::new("max-length")
            .long("max-length")
            .value_name("CHARS")
            .help("Character budget of a message")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("media-caps")
            .long("media-caps")
            .value_name("POLICY")
            .help("Title/artist length caps")
            .value_parser(MediaCapPolicy::NAMES),
        Arg::new("gpu-memory")
            .long("gpu-memory")
            .value_name("FIGURE")
            .help("VRAM figure shown next to the total")
            .value_parser(GpuMemoryReport::NAMES),
        Arg::new("no-os")
            .long("no-os")
            .help("Leave out the distribution line")
            .action(ArgAction::SetTrue),
        Arg::new("tool-timeout-ms")
            .long("tool-timeout-ms")
            .value_name("MS")
            .help("Deadline for nvidia-smi / sensors")
            .value_parser(clap::value_parser!(u64)),
    ]
}

/// Load the configuration file and apply command-line overrides
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(host) = matches.get_one::<String>("host") {
        config.host = host.clone();
    }
    if let Some(&port) = matches.get_one::<u16>("port") {
        config.port = port;
    }
    if let Some(&interval) = matches.get_one::<u64>("interval-ms") {
        config.interval_ms = interval;
    }
    if let Some(&max_length) = matches.get_one::<usize>("max-length") {
        config.max_length = max_length;
    }
    if let Some(policy) = matches.get_one::<String>("media-caps") {
        config.media_caps = policy.parse()?;
    }
    if let Some(report) = matches.get_one::<String>("gpu-memory") {
        config.gpu_memory = report.parse()?;
    }
    if matches.get_flag("no-os") {
        config.show_os = false;
    }
    if let Some(&timeout) = matches.get_one::<u64>("tool-timeout-ms") {
        config.tool_timeout_ms = timeout;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
