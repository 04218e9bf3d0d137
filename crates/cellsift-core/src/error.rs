use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Project directory {0} does not exist")]
    ProjectDirNotFound(PathBuf),

    #[error("{kind} not found in {dir}")]
    ProjectFileNotFound { kind: &'static str, dir: PathBuf },

    #[error("Unknown cell: {0}")]
    UnknownCell(String),

    #[error("Duplicate cell: {0}")]
    DuplicateCell(String),

    #[error("Invalid cell name: {0:?}")]
    InvalidCellName(String),

    #[error("No outline for cell {0}")]
    MissingOutline(String),

    #[error("No centroid for cell {0}")]
    MissingCentroid(String),

    #[error("No trace for cell {0}")]
    MissingTrace(String),

    #[error("Cells {first} and {second} share one trace panel")]
    SharedTrace { first: String, second: String },

    #[error("Trace for cell {0} has no samples")]
    EmptyTrace(String),

    #[error("Curation session has already finished")]
    SessionFinished,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CurationError>;
