//! Selection tool for clicking objects in and out of the selection.

use void_tools::{Capabilities, Hits, InputState, MouseButtons, Tool, ToolId};

use crate::core::{SelectionMode, SharedDocument};

pub const SELECTION_TOOL_ID: ToolId = ToolId("selection");

/// Click selects the nearest object, shift-click toggles it, a click on
/// empty space clears the selection.
pub struct SelectionTool {
    document: SharedDocument,
    pick_radius: f32,
}

impl SelectionTool {
    pub fn new(document: SharedDocument, pick_radius: f32) -> Self {
        Self {
            document,
            pick_radius,
        }
    }
}

impl Tool for SelectionTool {
    fn id(&self) -> ToolId {
        SELECTION_TOOL_ID
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::PICK
    }

    fn initially_active(&self) -> bool {
        true
    }

    fn pick(&self, input: &InputState, hits: &mut Hits) {
        self.document
            .borrow()
            .pick_objects(input.position(), self.pick_radius, hits);
    }

    fn mouse_up(&mut self, input: &InputState) -> bool {
        if !input.mouse_buttons_pressed(MouseButtons::LEFT) {
            return false;
        }

        let mode = SelectionMode::from_modifiers(input.modifiers());
        let mut document = self.document.borrow_mut();
        match document.object_at(input.position(), self.pick_radius) {
            Some(id) => {
                document.selection_mut().select(id, mode);
                log::trace!("Selected {} ({:?})", id, mode);
            }
            None if mode == SelectionMode::Replace => document.selection_mut().clear(),
            None => {}
        }
        true
    }
}
