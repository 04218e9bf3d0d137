use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ProjectLayout;
use crate::error::{CurationError, Result};

/// Resolved input files of one imaging project.
#[derive(Clone, Debug)]
pub struct ProjectFolder {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub projection_path: PathBuf,
    pub traces_path: PathBuf,
    pub props_path: PathBuf,
    pub contours_path: PathBuf,
}

impl ProjectFolder {
    /// Locate every input file under `root` following `layout`.
    ///
    /// The first match of each pattern wins, in lexical order.
    pub fn discover(root: &Path, layout: &ProjectLayout) -> Result<Self> {
        if !root.is_dir() {
            return Err(CurationError::ProjectDirNotFound(root.to_path_buf()));
        }

        let data_dir = root.join(&layout.data_subdir);
        if !data_dir.is_dir() {
            return Err(CurationError::ProjectDirNotFound(data_dir));
        }

        let folder = Self {
            root: root.to_path_buf(),
            projection_path: find_first(&data_dir, &layout.projection_pattern, "Max projection image")?,
            traces_path: find_first(&data_dir, &layout.traces_pattern, "Cell trace data")?,
            props_path: find_first(&data_dir, &layout.props_pattern, "Cell props data")?,
            contours_path: find_first(&data_dir, &layout.contours_pattern, "Cell contour data")?,
            data_dir,
        };
        debug!(?folder, "project discovered");
        Ok(folder)
    }
}

fn find_first(dir: &Path, pattern: &str, kind: &'static str) -> Result<PathBuf> {
    let full = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join(pattern);
    let mut matches: Vec<PathBuf> = glob::glob(&full.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();
    matches.sort();
    matches
        .into_iter()
        .next()
        .ok_or_else(|| CurationError::ProjectFileNotFound {
            kind,
            dir: dir.to_path_buf(),
        })
}
