//! Show or write the configuration file.

use panshake_common::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, write_defaults: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if write_defaults {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        AppConfig::default()
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("  (not present, using defaults)");
    }
    println!("{}", serde_json::to_string_pretty(config)?);

    Ok(())
}
