use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use cable_cli::config::{save_config, CableConfig};

pub fn handle_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    save_config(path, &CableConfig::default())?;
    info!("wrote default config to {}", path.display());
    println!("Wrote default config to {}", path.display());
    Ok(())
}

pub fn handle_show(path: &Path, config: &CableConfig) -> Result<()> {
    let text = toml::to_string_pretty(config)?;
    println!("# {}", path.display());
    print!("{text}");
    Ok(())
}
