use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ndarray::Array2;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::cell::{CellKey, CellSource, TraceHandle};
use crate::error::{CurationError, Result};
use crate::geometry::{Point, Size};
use crate::io::project::ProjectFolder;
use crate::session::SessionInputs;
use crate::trace::{build_panels, TraceTable};

/// 8-bit grayscale reference image, row-major.
#[derive(Clone, Debug)]
pub struct ProjectionImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl ProjectionImage {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// One row of the cell properties table. Extra columns are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct CellProps {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CentroidX", default)]
    pub centroid_x: Option<f32>,
    #[serde(rename = "CentroidY", default)]
    pub centroid_y: Option<f32>,
}

impl CellProps {
    pub fn centroid(&self) -> Option<Point> {
        Some(Point::new(self.centroid_x?, self.centroid_y?))
    }
}

/// Everything needed to start a session from a project folder.
pub struct LoadedProject {
    pub inputs: SessionInputs,
    pub image: ProjectionImage,
    pub sample_count: usize,
}

pub fn load_projection(path: &Path) -> Result<ProjectionImage> {
    let gray = image::open(path)?.to_luma8();
    let (w, h) = gray.dimensions();
    Ok(ProjectionImage {
        width: w as usize,
        height: h as usize,
        pixels: gray.into_raw(),
    })
}

pub fn load_props(path: &Path) -> Result<Vec<CellProps>> {
    read_props(File::open(path)?)
}

pub fn read_props<R: Read>(reader: R) -> Result<Vec<CellProps>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut props = Vec::new();
    for row in rdr.deserialize() {
        props.push(row?);
    }
    Ok(props)
}

/// Outline vertices per cell name; only the first ring of each cell is kept.
pub fn load_contours(path: &Path) -> Result<HashMap<CellKey, Vec<Point>>> {
    read_contours(BufReader::new(File::open(path)?))
}

pub fn read_contours<R: Read>(reader: R) -> Result<HashMap<CellKey, Vec<Point>>> {
    let raw: HashMap<String, Vec<Vec<[f32; 2]>>> = serde_json::from_reader(reader)?;
    Ok(raw
        .into_iter()
        .map(|(name, rings)| {
            let outline = rings
                .into_iter()
                .next()
                .unwrap_or_default()
                .into_iter()
                .map(|[x, y]| Point::new(x, y))
                .collect();
            (CellKey::new(name), outline)
        })
        .collect())
}

pub fn load_traces(path: &Path) -> Result<TraceTable> {
    read_traces(File::open(path)?)
}

/// Parse a trace table: a header row of cell names, an optional leading time
/// column, then one row per sample. Rows that are not numeric (status rows)
/// are skipped.
pub fn read_traces<R: Read>(reader: R) -> Result<TraceTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let first_is_cell = headers
        .get(0)
        .map(|h| CellKey::from(h).numeric_suffix().is_some())
        .unwrap_or(false);
    let skip = usize::from(!first_is_cell);
    let names: Vec<CellKey> = headers.iter().skip(skip).map(CellKey::from).collect();

    let mut values = Vec::new();
    let mut rows = 0usize;
    for record in rdr.records() {
        let record = record?;
        let parsed: std::result::Result<Vec<f64>, _> =
            record.iter().skip(skip).map(str::parse::<f64>).collect();
        match parsed {
            Ok(row) if row.len() == names.len() => {
                values.extend(row);
                rows += 1;
            }
            _ => debug!(line = ?record.position().map(|p| p.line()), "skipping non-numeric trace row"),
        }
    }

    let data = Array2::from_shape_vec((rows, names.len()), values)
        .map_err(|e| CurationError::Config(format!("trace table shape: {e}")))?;
    Ok(TraceTable { names, data })
}

/// Assemble session inputs from a discovered project. Registry order follows
/// the properties file; each cell gets the trace panel at its own position.
pub fn load_project(folder: &ProjectFolder) -> Result<LoadedProject> {
    let props = load_props(&folder.props_path)?;
    let mut contours = load_contours(&folder.contours_path)?;
    let table = load_traces(&folder.traces_path)?;
    let image = load_projection(&folder.projection_path)?;

    let keys: Vec<CellKey> = props.iter().map(|p| CellKey::new(p.name.clone())).collect();
    let panels = build_panels(&table, &keys)?;

    let unused = table.names.iter().filter(|n| !keys.contains(n)).count();
    if unused > 0 {
        warn!(unused, "trace columns without a matching cell are ignored");
    }

    let cells = props
        .iter()
        .zip(keys)
        .enumerate()
        .map(|(i, (p, key))| {
            let outline = contours
                .remove(&key)
                .ok_or_else(|| CurationError::MissingOutline(key.to_string()))?;
            Ok(CellSource {
                key,
                outline,
                centroid: p.centroid(),
                trace: TraceHandle(i),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        cells = cells.len(),
        samples = table.sample_count(),
        width = image.width,
        height = image.height,
        "project loaded"
    );

    Ok(LoadedProject {
        inputs: SessionInputs {
            cells,
            panels,
            image_size: Some(image.size()),
        },
        sample_count: table.sample_count(),
        image,
    })
}
