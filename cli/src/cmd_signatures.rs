//! `logdecode signatures`: list the registered events.

use anyhow::Result;

use crate::config::CliConfig;

pub fn run(config: &CliConfig, as_json: bool) -> Result<()> {
    let registry = config.signature_registry()?;

    if as_json {
        let specs: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&specs)?);
        return Ok(());
    }

    println!("{} registered events", registry.len());
    for spec in registry.iter() {
        println!("  {:<18} {}", spec.name, spec.hash);
        println!("  {:<18} {}", "", spec.signature);
    }
    Ok(())
}
