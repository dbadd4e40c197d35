//! Move tool for translating the selection with a left drag.

use void_tools::{Capabilities, InputState, Tool, ToolId};

use crate::core::{sub, MapObject, SharedDocument};

use super::plain_left;

pub const MOVE_OBJECTS_TOOL_ID: ToolId = ToolId("move_objects");

struct MoveDrag {
    last_point: [f32; 2],
    original: Vec<MapObject>,
}

/// Drags that start on a selected object move the whole selection.
pub struct MoveObjectsTool {
    document: SharedDocument,
    pick_radius: f32,
    drag: Option<MoveDrag>,
}

impl MoveObjectsTool {
    pub fn new(document: SharedDocument, pick_radius: f32) -> Self {
        Self {
            document,
            pick_radius,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl Tool for MoveObjectsTool {
    fn id(&self) -> ToolId {
        MOVE_OBJECTS_TOOL_ID
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::DRAG
    }

    fn initially_active(&self) -> bool {
        true
    }

    fn on_deactivate(&mut self) {
        self.drag = None;
    }

    fn start_mouse_drag(&mut self, input: &InputState) -> bool {
        if !plain_left(input) {
            return false;
        }

        let document = self.document.borrow();
        let on_selection = document
            .object_at(input.position(), self.pick_radius)
            .map_or(false, |id| document.selection().is_selected(id));
        if !on_selection {
            return false;
        }

        self.drag = Some(MoveDrag {
            last_point: input.position(),
            original: document.snapshot_selection(),
        });
        true
    }

    fn mouse_drag(&mut self, input: &InputState) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let delta = sub(input.position(), drag.last_point);
        self.document.borrow_mut().translate_selection(delta);
        drag.last_point = input.position();
        true
    }

    fn end_mouse_drag(&mut self, _input: &InputState) {
        if let Some(drag) = self.drag.take() {
            log::debug!("Moved {} objects", drag.original.len());
        }
    }

    fn cancel_mouse_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.document.borrow_mut().restore(drag.original);
        }
    }
}
