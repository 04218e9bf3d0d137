use std::path::PathBuf;

use anyhow::Result;
use cellsift_core::config::CurationConfig;
use cellsift_core::io::loader::{load_projection, load_props, load_traces};
use cellsift_core::io::project::ProjectFolder;
use clap::Args;

use crate::summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Project directory
    pub project: PathBuf,
}

pub fn run(args: &InfoArgs, config: &CurationConfig) -> Result<()> {
    let folder = ProjectFolder::discover(&args.project, &config.project)?;
    let props = load_props(&folder.props_path)?;
    let traces = load_traces(&folder.traces_path)?;
    let image = load_projection(&folder.projection_path)?;

    summary::print_project_summary(&summary::ProjectSummary {
        folder: &folder,
        cell_count: props.len(),
        trace_columns: traces.names.len(),
        sample_count: traces.sample_count(),
        image_size: [image.width, image.height],
    });

    Ok(())
}
