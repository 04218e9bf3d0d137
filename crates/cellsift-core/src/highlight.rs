use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{CellIndex, CellRegistry};

/// Highlight requested for one outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightState {
    Included,
    Excluded,
}

impl From<bool> for HighlightState {
    fn from(on: bool) -> Self {
        if on {
            HighlightState::Included
        } else {
            HighlightState::Excluded
        }
    }
}

/// Stroke colour of an outline. `Negative` doubles as the neutral colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlineColor {
    Affirmative,
    Negative,
}

impl OutlineColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            OutlineColor::Affirmative => [0, 255, 0],
            OutlineColor::Negative => [255, 0, 0],
        }
    }
}

impl From<HighlightState> for OutlineColor {
    fn from(state: HighlightState) -> Self {
        match state {
            HighlightState::Included => OutlineColor::Affirmative,
            HighlightState::Excluded => OutlineColor::Negative,
        }
    }
}

impl fmt::Display for OutlineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineColor::Affirmative => write!(f, "green"),
            OutlineColor::Negative => write!(f, "red"),
        }
    }
}

/// Drawing style of one outline polygon. Outlines are never filled so the
/// projection underneath stays visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineStyle {
    pub stroke: OutlineColor,
    pub stroke_width: f32,
}

impl OutlineStyle {
    pub fn is_filled(&self) -> bool {
        false
    }
}

/// Stroke colours for every overlay polygon plus pending redraw marks.
#[derive(Clone, Debug)]
pub struct OutlineHighlighter {
    styles: Vec<OutlineStyle>,
    redraw: Vec<bool>,
}

impl OutlineHighlighter {
    /// All outlines start in the neutral colour.
    pub fn new(cell_count: usize, stroke_width: f32) -> Self {
        Self {
            styles: vec![
                OutlineStyle {
                    stroke: OutlineColor::Negative,
                    stroke_width,
                };
                cell_count
            ],
            redraw: vec![false; cell_count],
        }
    }

    /// Recolour exactly one outline's stroke and mark it for redraw.
    pub fn set_color(&mut self, index: CellIndex, state: HighlightState) -> OutlineColor {
        let color = OutlineColor::from(state);
        self.styles[index.get()].stroke = color;
        self.redraw[index.get()] = true;
        color
    }

    /// Return every outline to the neutral colour, in registry order.
    pub fn reset_all(&mut self, registry: &CellRegistry) {
        for index in registry.indices() {
            self.styles[index.get()].stroke = OutlineColor::Negative;
            self.redraw[index.get()] = true;
        }
    }

    pub fn style(&self, index: CellIndex) -> OutlineStyle {
        self.styles[index.get()]
    }

    pub fn color(&self, index: CellIndex) -> OutlineColor {
        self.styles[index.get()].stroke
    }

    pub fn needs_redraw(&self, index: CellIndex) -> bool {
        self.redraw[index.get()]
    }

    /// Drain the pending redraw marks.
    pub fn take_redraws(&mut self, registry: &CellRegistry) -> Vec<CellIndex> {
        registry
            .indices()
            .filter(|i| std::mem::take(&mut self.redraw[i.get()]))
            .collect()
    }
}
