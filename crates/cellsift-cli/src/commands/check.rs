use std::path::PathBuf;

use anyhow::{Context, Result};
use cellsift_core::config::CurationConfig;
use cellsift_core::io::loader::load_project;
use cellsift_core::io::project::ProjectFolder;
use cellsift_core::session::CurationSession;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct CheckArgs {
    /// Project directory
    pub project: PathBuf,
}

/// Build a full session the way the GUI would, without opening a window.
pub fn run(args: &CheckArgs, config: &CurationConfig) -> Result<()> {
    let folder = ProjectFolder::discover(&args.project, &config.project)?;
    let loaded = load_project(&folder)
        .with_context(|| format!("Failed to load project {}", args.project.display()))?;
    let session = CurationSession::new(loaded.inputs, config)
        .context("Project inputs are inconsistent")?;

    let registry = session.registry();
    info!(cells = registry.len(), "session built");
    println!(
        "OK: {} cells, {} trace panels, {} samples per trace",
        registry.len(),
        session.traces().len(),
        loaded.sample_count
    );
    Ok(())
}
