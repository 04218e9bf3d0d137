use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;

use crate::cell::{CellKey, TraceHandle};
use crate::consts::{PARALLEL_CELL_THRESHOLD, TRACE_LABEL_DECIMALS};
use crate::error::{CurationError, Result};

/// Fluorescence samples for every cell.
/// Shape = (samples, cells); column `j` belongs to `names[j]`.
#[derive(Clone, Debug)]
pub struct TraceTable {
    pub names: Vec<CellKey>,
    pub data: Array2<f64>,
}

impl TraceTable {
    pub fn sample_count(&self) -> usize {
        self.data.nrows()
    }

    pub fn column_of(&self, key: &CellKey) -> Option<usize> {
        self.names.iter().position(|n| n == key)
    }
}

/// A cell's trace, prepared for display: samples scaled into [0, 1] plus the
/// original range for the axis labels.
#[derive(Clone, Debug)]
pub struct TracePanel {
    pub key: CellKey,
    pub samples: Vec<f32>,
    pub raw_min: f64,
    pub raw_max: f64,
    /// Mean of the scaled samples, drawn as a reference line.
    pub mean: f32,
}

impl TracePanel {
    pub fn from_samples(key: CellKey, raw: ArrayView1<'_, f64>) -> Result<Self> {
        if raw.is_empty() {
            return Err(CurationError::EmptyTrace(key.to_string()));
        }

        let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        let samples: Vec<f32> = if range > 0.0 {
            raw.iter().map(|&v| ((v - min) / range) as f32).collect()
        } else {
            vec![0.0; raw.len()]
        };
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;

        Ok(Self {
            key,
            samples,
            raw_min: round_to(min, TRACE_LABEL_DECIMALS),
            raw_max: round_to(max, TRACE_LABEL_DECIMALS),
            mean,
        })
    }

    pub fn title(&self) -> String {
        format!("Cell: {}", self.key)
    }
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let m = 10f64.powi(decimals);
    (v * m).round() / m
}

/// Build one panel per requested key, in the order given.
///
/// The returned handles index into the returned panel vector.
pub fn build_panels(table: &TraceTable, keys: &[CellKey]) -> Result<Vec<TracePanel>> {
    let columns: Vec<(CellKey, usize)> = keys
        .iter()
        .map(|k| {
            table
                .column_of(k)
                .map(|c| (k.clone(), c))
                .ok_or_else(|| CurationError::MissingTrace(k.to_string()))
        })
        .collect::<Result<_>>()?;

    let build = |(key, col): &(CellKey, usize)| {
        TracePanel::from_samples(key.clone(), table.data.index_axis(Axis(1), *col))
    };

    if columns.len() >= PARALLEL_CELL_THRESHOLD {
        columns.par_iter().map(build).collect()
    } else {
        columns.iter().map(build).collect()
    }
}

/// The trace list surface: every panel plus its shown/hidden flag.
#[derive(Clone, Debug, Default)]
pub struct TraceBoard {
    panels: Vec<TracePanel>,
    shown: Vec<bool>,
}

impl TraceBoard {
    /// All panels start shown.
    pub fn new(panels: Vec<TracePanel>) -> Self {
        let shown = vec![true; panels.len()];
        Self { panels, shown }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, handle: TraceHandle) -> bool {
        handle.0 < self.panels.len()
    }

    pub fn panel(&self, handle: TraceHandle) -> &TracePanel {
        &self.panels[handle.0]
    }

    pub fn set_shown(&mut self, handle: TraceHandle, shown: bool) {
        self.shown[handle.0] = shown;
    }

    pub fn is_shown(&self, handle: TraceHandle) -> bool {
        self.shown[handle.0]
    }

    pub fn shown_count(&self) -> usize {
        self.shown.iter().filter(|&&s| s).count()
    }
}
