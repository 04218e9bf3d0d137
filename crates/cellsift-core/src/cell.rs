use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::CELL_NAME_PREFIX;
use crate::error::{CurationError, Result};
use crate::geometry::{polygon_centroid, Point, Rect};

/// Stable identifier of a cell, e.g. `"C003"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellKey(String);

impl CellKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix with leading zeros dropped (`"C003"` -> `3`).
    pub fn numeric_suffix(&self) -> Option<u32> {
        let digits = self.0.strip_prefix(CELL_NAME_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Position of a cell in registry order. Shared by every synchronized view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(usize);

impl CellIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Handle into the collection of pre-rendered trace panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceHandle(pub usize);

/// Per-cell input, received fully formed from the loading collaborators.
/// Coordinates are raw image pixels.
#[derive(Clone, Debug)]
pub struct CellSource {
    pub key: CellKey,
    pub outline: Vec<Point>,
    pub centroid: Option<Point>,
    pub trace: TraceHandle,
}

/// One registered cell. Coordinates are in scene space (already scaled).
#[derive(Clone, Debug)]
pub struct Cell {
    pub key: CellKey,
    pub outline: Vec<Point>,
    pub label_anchor: Point,
    pub label: String,
    pub trace: TraceHandle,
}

impl Cell {
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.outline.iter().copied())
    }
}

/// Ordered, immutable set of cells fixed at session start.
#[derive(Clone, Debug, Default)]
pub struct CellRegistry {
    cells: Vec<Cell>,
    by_key: HashMap<CellKey, CellIndex>,
}

impl CellRegistry {
    /// Build the registry, scaling every coordinate by `outline_scale`.
    ///
    /// Names must follow the `C<digits>` pattern and be unique, and every
    /// outline needs at least one vertex.
    pub fn new(sources: Vec<CellSource>, outline_scale: f32) -> Result<Self> {
        let mut cells = Vec::with_capacity(sources.len());
        let mut by_key = HashMap::with_capacity(sources.len());

        for source in sources {
            let suffix = source
                .key
                .numeric_suffix()
                .ok_or_else(|| CurationError::InvalidCellName(source.key.to_string()))?;
            if source.outline.is_empty() {
                return Err(CurationError::MissingOutline(source.key.to_string()));
            }
            if by_key.contains_key(&source.key) {
                return Err(CurationError::DuplicateCell(source.key.to_string()));
            }

            let outline: Vec<Point> = source
                .outline
                .iter()
                .map(|p| p.scaled(outline_scale))
                .collect();
            let label_anchor = match source.centroid {
                Some(c) => c.scaled(outline_scale),
                None => polygon_centroid(&outline)
                    .ok_or_else(|| CurationError::MissingCentroid(source.key.to_string()))?,
            };

            by_key.insert(source.key.clone(), CellIndex(cells.len()));
            cells.push(Cell {
                key: source.key,
                outline,
                label_anchor,
                label: suffix.to_string(),
                trace: source.trace,
            });
        }

        Ok(Self { cells, by_key })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Look up a cell by key. Unknown keys are a contract violation.
    pub fn index_of(&self, key: &CellKey) -> Result<CellIndex> {
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| CurationError::UnknownCell(key.to_string()))
    }

    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.0]
    }

    pub fn indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.cells.len()).map(CellIndex)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (CellIndex(i), c))
    }

    /// Union of every outline's bounding box.
    pub fn outline_bounds(&self) -> Option<Rect> {
        self.cells
            .iter()
            .filter_map(Cell::bounds)
            .reduce(|a, b| a.union(&b))
    }
}
