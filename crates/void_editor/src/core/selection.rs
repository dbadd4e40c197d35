//! Object selection for the map document.

use void_tools::ModifierKeys;

use super::ObjectId;

/// How a click changes the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Select only the clicked object
    #[default]
    Replace,
    /// Flip the clicked object in or out of the selection
    Toggle,
}

impl SelectionMode {
    /// Shift toggles, anything else replaces.
    pub fn from_modifiers(modifiers: ModifierKeys) -> Self {
        if modifiers.contains(ModifierKeys::SHIFT) {
            Self::Toggle
        } else {
            Self::Replace
        }
    }
}

/// Selected objects, in selection order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<ObjectId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    pub fn select(&mut self, id: ObjectId, mode: SelectionMode) {
        match mode {
            SelectionMode::Replace => {
                self.selected.clear();
                self.selected.push(id);
            }
            SelectionMode::Toggle => {
                if self.is_selected(id) {
                    self.selected.retain(|&selected| selected != id);
                } else {
                    self.selected.push(id);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop an object that left the document.
    pub fn remove(&mut self, id: ObjectId) {
        self.selected.retain(|&selected| selected != id);
    }
}
