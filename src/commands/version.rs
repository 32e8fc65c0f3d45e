use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("vrcstat version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
