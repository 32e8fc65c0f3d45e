use anyhow::Result;

use vrcstat::commands::{self, build_cli};

fn main() -> Result<()> {
    vrcstat::init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches)?,
        Some(("preview", sub_matches)) => commands::preview(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::execute(sub_matches)?,
        Some(("completions", sub_matches)) => {
            let mut cli = build_cli();
            commands::completions::execute(sub_matches, &mut cli)?;
        }
        Some(("version", _)) => commands::version()?,
        // Bare invocation runs the publish loop
        _ => commands::run(&matches)?,
    }

    Ok(())
}
