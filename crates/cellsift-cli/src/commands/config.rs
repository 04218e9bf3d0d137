use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cellsift_core::config::CurationConfig;
use clap::Args;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default CurationConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let toml_str = toml::to_string_pretty(&CurationConfig::default())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

/// Read and validate a config file, or fall back to defaults.
pub fn load(path: Option<&Path>) -> Result<CurationConfig> {
    let Some(path) = path else {
        return Ok(CurationConfig::default());
    };
    CurationConfig::from_toml_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}
