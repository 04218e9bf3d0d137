use crate::cell::{CellIndex, CellKey, CellRegistry};

/// Per-cell "include in export" flags, aligned with registry order.
///
/// Nothing outside the session reads these until export.
#[derive(Clone, Debug)]
pub struct SelectionStore {
    included: Vec<bool>,
}

impl SelectionStore {
    /// Every cell starts included (opt-out curation).
    pub fn new(cell_count: usize) -> Self {
        Self {
            included: vec![true; cell_count],
        }
    }

    pub fn set(&mut self, index: CellIndex, included: bool) {
        self.included[index.get()] = included;
    }

    pub fn toggle(&mut self, index: CellIndex) -> bool {
        let slot = &mut self.included[index.get()];
        *slot = !*slot;
        *slot
    }

    /// Apply `included` to every cell in registry order.
    pub fn set_all(&mut self, registry: &CellRegistry, included: bool) {
        for index in registry.indices() {
            self.set(index, included);
        }
    }

    pub fn is_included(&self, index: CellIndex) -> bool {
        self.included[index.get()]
    }

    pub fn included_count(&self) -> usize {
        self.included.iter().filter(|&&v| v).count()
    }

    /// Keys of included cells, in registry order.
    pub fn snapshot(&self, registry: &CellRegistry) -> Vec<CellKey> {
        registry
            .iter()
            .filter(|(index, _)| self.is_included(*index))
            .map(|(_, cell)| cell.key.clone())
            .collect()
    }
}
