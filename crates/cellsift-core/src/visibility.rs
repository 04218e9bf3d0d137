use crate::cell::{CellIndex, CellRegistry};

/// Per-cell "currently shown" flags, aligned with registry order.
#[derive(Clone, Debug)]
pub struct VisibilityStore {
    visible: Vec<bool>,
}

impl VisibilityStore {
    pub fn new(cell_count: usize) -> Self {
        Self {
            visible: vec![true; cell_count],
        }
    }

    /// Flip one cell and return its new state.
    pub fn toggle(&mut self, index: CellIndex) -> bool {
        let slot = &mut self.visible[index.get()];
        *slot = !*slot;
        *slot
    }

    pub fn set(&mut self, index: CellIndex, visible: bool) {
        self.visible[index.get()] = visible;
    }

    pub fn set_all(&mut self, registry: &CellRegistry, visible: bool) {
        for index in registry.indices() {
            self.set(index, visible);
        }
    }

    pub fn is_visible(&self, index: CellIndex) -> bool {
        self.visible[index.get()]
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }
}
