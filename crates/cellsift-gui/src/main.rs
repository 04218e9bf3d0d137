mod app;
mod convert;
mod panels;
mod state;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{Context, Result};
use cellsift_core::config::CurationConfig;
use cellsift_core::io::loader::load_project;
use cellsift_core::io::project::ProjectFolder;
use cellsift_core::session::{CuratedResult, CurationOutcome, CurationSession};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cellsift-gui", about = "Interactive cell curation")]
#[command(version)]
struct Args {
    /// Project directory (a folder picker opens when omitted)
    project: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write accepted cell names here as a JSON array instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => CurationConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CurationConfig::default(),
    };

    let Some(project) = args.project.clone().or_else(pick_project) else {
        tracing::info!("no project selected");
        return Ok(ExitCode::SUCCESS);
    };

    let folder = ProjectFolder::discover(&project, &config.project)?;
    let loaded = load_project(&folder)
        .with_context(|| format!("Failed to load project {}", project.display()))?;
    let session = CurationSession::new(loaded.inputs, &config)
        .context("Project inputs are inconsistent")?;

    let outcome = Rc::new(RefCell::new(CurationOutcome::Cancelled));
    let slot = outcome.clone();
    let title = format!("Manual Curation - {}", project.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        "CellSift",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CurationApp::new(
                &cc.egui_ctx,
                session,
                loaded.image,
                config.display.clone(),
                slot,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))?;

    let outcome = outcome.borrow().clone();
    match outcome {
        CurationOutcome::Exported(result) => {
            write_result(&result, args.output.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        CurationOutcome::Cancelled => {
            tracing::info!("session cancelled, nothing exported");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn pick_project() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Project Directory:")
        .pick_folder()
}

fn write_result(result: &CuratedResult, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(result)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write result to {}", path.display()))?;
            tracing::info!(path = %path.display(), cells = result.len(), "result saved");
        }
        None => {
            for key in &result.keys {
                println!("{key}");
            }
        }
    }
    Ok(())
}
