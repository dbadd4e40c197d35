//! Map view tools.
//!
//! Each tool works on the shared `MapDocument`. The selection, move and
//! create-entity tools are always on; the rotate and vertex tools are modal
//! and switched through the session's tool box.

mod create_entity_tool;
mod move_objects_tool;
mod rotate_objects_tool;
mod selection_tool;
mod vertex_tool;

pub use create_entity_tool::{CreateEntityTool, CREATE_ENTITY_TOOL_ID, ENTITY_PAYLOAD_PREFIX};
pub use move_objects_tool::{MoveObjectsTool, MOVE_OBJECTS_TOOL_ID};
pub use rotate_objects_tool::{RotateObjectsTool, ROTATE_OBJECTS_TOOL_ID};
pub use selection_tool::{SelectionTool, SELECTION_TOOL_ID};
pub use vertex_tool::{VertexTool, VERTEX_HANDLE_HIT, VERTEX_TOOL_ID};

use void_tools::{InputState, ModifierKeys, MouseButtons};

/// Plain left click or drag: left button, no modifiers.
pub(crate) fn plain_left(input: &InputState) -> bool {
    input.mouse_buttons_pressed(MouseButtons::LEFT)
        && input.modifier_keys_pressed(ModifierKeys::NONE)
}
