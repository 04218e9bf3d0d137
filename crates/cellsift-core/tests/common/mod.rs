#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use cellsift_core::cell::{Cell, CellKey, CellSource, TraceHandle};
use cellsift_core::config::CurationConfig;
use cellsift_core::geometry::{Point, Size};
use cellsift_core::highlight::OutlineColor;
use cellsift_core::session::{CurationObserver, CurationOutcome, CurationSession, SessionInputs};
use cellsift_core::trace::TracePanel;
use ndarray::Array1;

/// A square outline of side 2 pixels with its top-left corner at (x, y).
pub fn square(x: f32, y: f32) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + 2.0, y),
        Point::new(x + 2.0, y + 2.0),
        Point::new(x, y + 2.0),
    ]
}

pub fn panel(key: &str, samples: &[f64]) -> TracePanel {
    TracePanel::from_samples(CellKey::from(key), Array1::from(samples.to_vec()).view()).unwrap()
}

/// Inputs for `names`, laid out left to right, each owning the trace panel at
/// its own position.
pub fn inputs(names: &[&str]) -> SessionInputs {
    let cells = names
        .iter()
        .enumerate()
        .map(|(i, name)| CellSource {
            key: CellKey::from(*name),
            outline: square(i as f32 * 4.0, 1.0),
            centroid: None,
            trace: TraceHandle(i),
        })
        .collect();
    let panels = names
        .iter()
        .map(|name| panel(name, &[0.0, 1.0, 0.5]))
        .collect();
    SessionInputs {
        cells,
        panels,
        image_size: Some(Size::new(64.0, 32.0)),
    }
}

pub fn session(names: &[&str]) -> CurationSession {
    CurationSession::new(inputs(names), &CurationConfig::default()).unwrap()
}

pub fn keys(names: &[&str]) -> Vec<CellKey> {
    names.iter().map(|n| CellKey::from(*n)).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Selection(String, bool),
    TracePanel(String, bool),
    Outline(String, OutlineColor),
    OutlinesReset,
    Finished(CurationOutcome),
}

/// Observer that appends every published event to a shared log.
pub struct Recorder(pub Rc<RefCell<Vec<Event>>>);

impl CurationObserver for Recorder {
    fn selection_changed(&mut self, cell: &Cell, included: bool) {
        self.0
            .borrow_mut()
            .push(Event::Selection(cell.key.to_string(), included));
    }

    fn trace_panel_changed(&mut self, cell: &Cell, shown: bool) {
        self.0
            .borrow_mut()
            .push(Event::TracePanel(cell.key.to_string(), shown));
    }

    fn outline_recolored(&mut self, cell: &Cell, color: OutlineColor) {
        self.0
            .borrow_mut()
            .push(Event::Outline(cell.key.to_string(), color));
    }

    fn outlines_reset(&mut self) {
        self.0.borrow_mut().push(Event::OutlinesReset);
    }

    fn finished(&mut self, outcome: &CurationOutcome) {
        self.0.borrow_mut().push(Event::Finished(outcome.clone()));
    }
}

/// Attach a recorder and return its log.
pub fn record(session: &mut CurationSession) -> Rc<RefCell<Vec<Event>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    session.add_observer(Box::new(Recorder(log.clone())));
    log
}
