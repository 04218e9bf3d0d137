use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cell::{Cell, CellIndex, CellKey, CellRegistry, CellSource, TraceHandle};
use crate::config::CurationConfig;
use crate::error::{CurationError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::highlight::{HighlightState, OutlineColor, OutlineHighlighter};
use crate::selection::SelectionStore;
use crate::trace::{TraceBoard, TracePanel};
use crate::viewport::ViewportController;
use crate::visibility::VisibilityStore;

/// Keys accepted at export, in registry order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuratedResult {
    pub keys: Vec<CellKey>,
}

impl CuratedResult {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// How a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurationOutcome {
    Exported(CuratedResult),
    /// Closed without exporting.
    Cancelled,
}

impl CurationOutcome {
    pub fn accepted(&self) -> Option<&CuratedResult> {
        match self {
            CurationOutcome::Exported(result) => Some(result),
            CurationOutcome::Cancelled => None,
        }
    }
}

/// Receives every state change the session publishes, synchronously and in
/// the order it was applied.
pub trait CurationObserver {
    fn selection_changed(&mut self, _cell: &Cell, _included: bool) {}
    fn trace_panel_changed(&mut self, _cell: &Cell, _shown: bool) {}
    fn outline_recolored(&mut self, _cell: &Cell, _color: OutlineColor) {}
    fn outlines_reset(&mut self) {}
    fn finished(&mut self, _outcome: &CurationOutcome) {}
}

/// Everything the loading collaborators hand over at launch.
#[derive(Clone, Debug, Default)]
pub struct SessionInputs {
    pub cells: Vec<CellSource>,
    pub panels: Vec<TracePanel>,
    /// Pixel size of the reference image, if one is shown.
    pub image_size: Option<Size>,
}

pub struct CurationSession {
    registry: CellRegistry,
    selection: SelectionStore,
    visibility: VisibilityStore,
    highlighter: OutlineHighlighter,
    traces: TraceBoard,
    viewport: ViewportController,
    observers: Vec<Box<dyn CurationObserver>>,
    outcome: Option<CurationOutcome>,
}

impl CurationSession {
    pub fn new(inputs: SessionInputs, config: &CurationConfig) -> Result<Self> {
        config.validate()?;

        let registry = CellRegistry::new(inputs.cells, config.display.outline_scale)?;
        let traces = TraceBoard::new(inputs.panels);
        check_trace_mapping(&registry, &traces)?;

        let image_rect = inputs
            .image_size
            .map(|size| Rect::from_min_size(Point::ZERO, size));
        let scene = match (image_rect, registry.outline_bounds()) {
            (Some(a), Some(b)) => a.union(&b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => Rect::default(),
        };

        let n = registry.len();
        info!(cells = n, panels = traces.len(), "curation session started");

        Ok(Self {
            selection: SelectionStore::new(n),
            visibility: VisibilityStore::new(n),
            highlighter: OutlineHighlighter::new(n, config.display.outline_width),
            viewport: ViewportController::new(config.zoom.clone(), scene),
            registry,
            traces,
            observers: Vec::new(),
            outcome: None,
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn CurationObserver>) {
        self.observers.push(observer);
    }

    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn visibility(&self) -> &VisibilityStore {
        &self.visibility
    }

    pub fn highlighter(&self) -> &OutlineHighlighter {
        &self.highlighter
    }

    /// Outlines recoloured since the last call, in registry order.
    pub fn take_outline_redraws(&mut self) -> Vec<CellIndex> {
        self.highlighter.take_redraws(&self.registry)
    }

    pub fn traces(&self) -> &TraceBoard {
        &self.traces
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn outcome(&self) -> Option<&CurationOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Handles of the trace panels currently shown, in registry order.
    pub fn shown_traces(&self) -> Vec<TraceHandle> {
        self.registry
            .iter()
            .map(|(_, cell)| cell.trace)
            .filter(|&handle| self.traces.is_shown(handle))
            .collect()
    }

    /// The trace panel that belongs to `index`.
    pub fn trace_for(&self, index: CellIndex) -> TraceHandle {
        self.registry.cell(index).trace
    }

    fn ensure_active(&self) -> Result<()> {
        if self.outcome.is_some() {
            return Err(CurationError::SessionFinished);
        }
        Ok(())
    }

    // ----- selection list -------------------------------------------------

    pub fn set_selection(&mut self, key: &CellKey, included: bool) -> Result<()> {
        self.ensure_active()?;
        let index = self.registry.index_of(key)?;
        self.apply_selection(index, included);
        Ok(())
    }

    pub fn toggle_selection(&mut self, key: &CellKey) -> Result<bool> {
        self.ensure_active()?;
        let index = self.registry.index_of(key)?;
        let included = self.selection.toggle(index);
        self.notify_selection(index, included);
        Ok(included)
    }

    pub fn select_all(&mut self) -> Result<()> {
        self.set_all_selection(true)
    }

    pub fn select_none(&mut self) -> Result<()> {
        self.set_all_selection(false)
    }

    fn set_all_selection(&mut self, included: bool) -> Result<()> {
        self.ensure_active()?;
        self.selection.set_all(&self.registry, included);
        for (_, cell) in self.registry.iter() {
            for obs in &mut self.observers {
                obs.selection_changed(cell, included);
            }
        }
        info!(included, "selection set for all cells");
        Ok(())
    }

    fn apply_selection(&mut self, index: CellIndex, included: bool) {
        self.selection.set(index, included);
        self.notify_selection(index, included);
    }

    fn notify_selection(&mut self, index: CellIndex, included: bool) {
        let cell = self.registry.cell(index);
        debug!(cell = %cell.key, included, "selection changed");
        for obs in &mut self.observers {
            obs.selection_changed(cell, included);
        }
    }

    // ----- view list ------------------------------------------------------

    /// Flip one cell's visibility. Shows or hides its trace panel, then
    /// recolours its outline from the new visibility.
    pub fn toggle_view(&mut self, key: &CellKey) -> Result<bool> {
        self.ensure_active()?;
        let index = self.registry.index_of(key)?;
        let visible = self.visibility.toggle(index);
        self.publish_visibility(index, visible);
        Ok(visible)
    }

    /// Checkbox entry point: toggles only when `visible` differs from the
    /// stored state.
    pub fn set_view(&mut self, key: &CellKey, visible: bool) -> Result<()> {
        self.ensure_active()?;
        let index = self.registry.index_of(key)?;
        if self.visibility.is_visible(index) != visible {
            let now = self.visibility.toggle(index);
            self.publish_visibility(index, now);
        }
        Ok(())
    }

    pub fn view_all(&mut self) -> Result<()> {
        self.set_all_view(true)
    }

    pub fn view_none(&mut self) -> Result<()> {
        self.set_all_view(false)
    }

    /// Bulk visibility: every trace panel follows `visible`, then all
    /// outlines go back to the neutral colour in one pass.
    fn set_all_view(&mut self, visible: bool) -> Result<()> {
        self.ensure_active()?;
        self.visibility.set_all(&self.registry, visible);
        for (_, cell) in self.registry.iter() {
            self.traces.set_shown(cell.trace, visible);
            for obs in &mut self.observers {
                obs.trace_panel_changed(cell, visible);
            }
        }
        self.highlighter.reset_all(&self.registry);
        for obs in &mut self.observers {
            obs.outlines_reset();
        }
        info!(visible, "visibility set for all cells");
        Ok(())
    }

    fn publish_visibility(&mut self, index: CellIndex, visible: bool) {
        let cell = self.registry.cell(index);
        self.traces.set_shown(cell.trace, visible);
        for obs in &mut self.observers {
            obs.trace_panel_changed(cell, visible);
        }

        let color = self
            .highlighter
            .set_color(index, HighlightState::from(visible));
        for obs in &mut self.observers {
            obs.outline_recolored(cell, color);
        }
        debug!(cell = %cell.key, visible, %color, "visibility toggled");
    }

    // ----- overlay viewport -----------------------------------------------

    pub fn on_show(&mut self, viewport: Size) -> Result<()> {
        self.ensure_active()?;
        self.viewport.show(viewport);
        Ok(())
    }

    pub fn on_resize(&mut self, viewport: Size) -> Result<()> {
        self.ensure_active()?;
        self.viewport.resize(viewport);
        Ok(())
    }

    pub fn on_wheel(&mut self, degrees: f32, cursor: Point) -> Result<()> {
        self.ensure_active()?;
        self.viewport.wheel(degrees, cursor);
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.viewport.zoom_in();
        Ok(())
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.viewport.zoom_out();
        Ok(())
    }

    pub fn reset_zoom(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.viewport.reset();
        Ok(())
    }

    pub fn pan(&mut self, delta: Point) -> Result<()> {
        self.ensure_active()?;
        self.viewport.pan(delta);
        Ok(())
    }

    // ----- termination ----------------------------------------------------

    /// Freeze the selection into the result and end the session.
    pub fn export(&mut self) -> Result<CuratedResult> {
        self.ensure_active()?;
        let result = CuratedResult {
            keys: self.selection.snapshot(&self.registry),
        };
        info!(accepted = result.len(), total = self.registry.len(), "cells exported");
        self.finish(CurationOutcome::Exported(result.clone()));
        Ok(result)
    }

    /// Window closed. Ends the session as cancelled unless it was exported.
    pub fn close(&mut self) -> CurationOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        info!("curation cancelled");
        self.finish(CurationOutcome::Cancelled);
        CurationOutcome::Cancelled
    }

    pub fn into_outcome(mut self) -> CurationOutcome {
        self.close()
    }

    fn finish(&mut self, outcome: CurationOutcome) {
        for obs in &mut self.observers {
            obs.finished(&outcome);
        }
        self.outcome = Some(outcome);
    }
}

/// Every cell must own a distinct, existing trace panel.
fn check_trace_mapping(registry: &CellRegistry, traces: &TraceBoard) -> Result<()> {
    let mut owners: HashMap<TraceHandle, &CellKey> = HashMap::with_capacity(registry.len());
    for (_, cell) in registry.iter() {
        if !traces.contains(cell.trace) {
            return Err(CurationError::MissingTrace(cell.key.to_string()));
        }
        if let Some(first) = owners.insert(cell.trace, &cell.key) {
            return Err(CurationError::SharedTrace {
                first: first.to_string(),
                second: cell.key.to_string(),
            });
        }
    }
    Ok(())
}
