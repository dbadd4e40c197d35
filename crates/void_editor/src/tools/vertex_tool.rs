//! Vertex tool for editing brush vertices through handles.

use void_tools::{
    Capabilities, Color, Hit, HitType, Hits, InputState, MouseButtons, RenderBatch, RenderCommand,
    RenderContext, Tool, ToolId,
};

use crate::core::{distance, sub, MapObject, SelectionMode, SharedDocument, VertexHandle};

use super::plain_left;

pub const VERTEX_TOOL_ID: ToolId = ToolId("vertex");

/// Hit type for vertex handles of selected brushes.
pub const VERTEX_HANDLE_HIT: HitType = HitType::new(1 << 1);

const HANDLE_COLOR: Color = [1.0, 1.0, 1.0, 1.0];
const SELECTED_HANDLE_COLOR: Color = [1.0, 0.0, 0.0, 1.0];

struct VertexDrag {
    last_point: [f32; 2],
    original: Vec<MapObject>,
}

/// Modal vertex tool. Only available while a brush is selected.
pub struct VertexTool {
    document: SharedDocument,
    handle_radius: f32,
    selected: Vec<VertexHandle>,
    drag: Option<VertexDrag>,
}

impl VertexTool {
    pub fn new(document: SharedDocument, handle_radius: f32) -> Self {
        Self {
            document,
            handle_radius,
            selected: Vec::new(),
            drag: None,
        }
    }

    pub fn selected_handles(&self) -> &[VertexHandle] {
        &self.selected
    }

    fn pick_handles(&self, point: [f32; 2], hits: &mut Hits) {
        let document = self.document.borrow();
        for brush in document.selected_objects().filter(|object| object.is_brush()) {
            for (index, vertex) in brush.vertices().enumerate() {
                let distance = distance(point, vertex);
                if distance <= self.handle_radius {
                    let handle = VertexHandle::new(brush.id, index);
                    hits.add(Hit::new(
                        VERTEX_HANDLE_HIT,
                        distance,
                        vertex,
                        handle.to_hit_target(),
                    ));
                }
            }
        }
    }

    fn handle_at(&self, point: [f32; 2]) -> Option<VertexHandle> {
        let mut hits = Hits::new();
        self.pick_handles(point, &mut hits);
        hits.first_of(VERTEX_HANDLE_HIT)
            .map(|hit| VertexHandle::from_hit_target(hit.target))
    }

    fn select_handle(&mut self, handle: VertexHandle, mode: SelectionMode) {
        match mode {
            SelectionMode::Replace => {
                self.selected.clear();
                self.selected.push(handle);
            }
            SelectionMode::Toggle => {
                if self.selected.contains(&handle) {
                    self.selected.retain(|&selected| selected != handle);
                } else {
                    self.selected.push(handle);
                }
            }
        }
    }
}

impl Tool for VertexTool {
    fn id(&self) -> ToolId {
        VERTEX_TOOL_ID
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::PICK | Capabilities::DRAG | Capabilities::RENDER | Capabilities::CANCEL
    }

    fn on_activate(&mut self) -> bool {
        if !self.document.borrow().has_selected_brush() {
            log::debug!("Vertex tool needs a selected brush");
            return false;
        }
        self.selected.clear();
        true
    }

    fn on_deactivate(&mut self) {
        self.selected.clear();
        self.drag = None;
    }

    fn pick(&self, input: &InputState, hits: &mut Hits) {
        self.pick_handles(input.position(), hits);
    }

    fn mouse_up(&mut self, input: &InputState) -> bool {
        if !input.mouse_buttons_pressed(MouseButtons::LEFT) {
            return false;
        }
        let Some(handle) = self.handle_at(input.position()) else {
            return false;
        };
        self.select_handle(handle, SelectionMode::from_modifiers(input.modifiers()));
        true
    }

    fn start_mouse_drag(&mut self, input: &InputState) -> bool {
        if !plain_left(input) {
            return false;
        }
        let Some(handle) = self.handle_at(input.position()) else {
            return false;
        };
        if !self.selected.contains(&handle) {
            self.select_handle(handle, SelectionMode::Replace);
        }

        let original = self.document.borrow().snapshot_selection();
        self.drag = Some(VertexDrag {
            last_point: input.position(),
            original,
        });
        true
    }

    fn mouse_drag(&mut self, input: &InputState) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let delta = sub(input.position(), drag.last_point);
        let mut document = self.document.borrow_mut();
        for handle in &self.selected {
            document.move_vertex(*handle, delta);
        }
        drag.last_point = input.position();
        true
    }

    fn end_mouse_drag(&mut self, _input: &InputState) {
        if self.drag.take().is_some() {
            log::debug!("Moved {} vertices", self.selected.len());
        }
    }

    fn cancel_mouse_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.document.borrow_mut().restore(drag.original);
        }
    }

    fn render(
        &self,
        _input: &InputState,
        _render_context: &RenderContext,
        render_batch: &mut dyn RenderBatch,
    ) {
        let document = self.document.borrow();
        for brush in document.selected_objects().filter(|object| object.is_brush()) {
            for (index, vertex) in brush.vertices().enumerate() {
                let selected = self.selected.contains(&VertexHandle::new(brush.id, index));
                render_batch.submit(RenderCommand::Handle {
                    position: vertex,
                    color: if selected {
                        SELECTED_HANDLE_COLOR
                    } else {
                        HANDLE_COLOR
                    },
                });
            }
        }
    }

    /// Deselects handles. Only consumes the cancel if there were any.
    fn cancel(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MapDocument, ObjectId};
    use void_tools::ModifierKeys;

    fn left(position: [f32; 2]) -> InputState {
        InputState::new(position).with_buttons(MouseButtons::LEFT)
    }

    fn setup() -> (SharedDocument, VertexTool, ObjectId) {
        let document = MapDocument::new().into_shared();
        let brush = {
            let mut doc = document.borrow_mut();
            let brush = doc.add_brush(
                [0.0, 0.0],
                vec![[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]],
            );
            doc.selection_mut().select(brush, SelectionMode::Replace);
            brush
        };
        let tool = VertexTool::new(document.clone(), 0.25);
        (document, tool, brush)
    }

    #[test]
    fn test_refuses_without_selected_brush() {
        let (document, mut tool, _) = setup();
        document.borrow_mut().selection_mut().clear();
        assert!(!tool.on_activate());

        let light = document.borrow_mut().add_entity("light", [5.0, 5.0]);
        document
            .borrow_mut()
            .selection_mut()
            .select(light, SelectionMode::Replace);
        assert!(!tool.on_activate());
    }

    #[test]
    fn test_pick_finds_handles_of_selected_brushes() {
        let (_, mut tool, brush) = setup();
        assert!(tool.on_activate());

        let mut hits = Hits::new();
        tool.pick(&InputState::new([1.1, 1.0]), &mut hits);

        assert_eq!(hits.len(), 1);
        let hit = hits.first().unwrap();
        assert_eq!(VertexHandle::from_hit_target(hit.target), VertexHandle::new(brush, 2));
    }

    #[test]
    fn test_click_selects_and_shift_click_adds() {
        let (_, mut tool, brush) = setup();
        tool.on_activate();

        assert!(tool.mouse_up(&left([1.0, 1.0])));
        assert!(tool.mouse_up(&left([-1.0, 1.0]).with_modifiers(ModifierKeys::SHIFT)));
        assert!(!tool.mouse_up(&left([0.0, 0.0])));

        assert_eq!(
            tool.selected_handles(),
            &[VertexHandle::new(brush, 2), VertexHandle::new(brush, 3)]
        );
    }

    #[test]
    fn test_drag_moves_selected_vertices() {
        let (document, mut tool, brush) = setup();
        tool.on_activate();
        tool.mouse_up(&left([1.0, 1.0]));
        tool.mouse_up(&left([-1.0, 1.0]).with_modifiers(ModifierKeys::SHIFT));

        assert!(tool.start_mouse_drag(&left([1.0, 1.0])));
        assert!(tool.mouse_drag(&left([1.0, 2.0])));
        tool.end_mouse_drag(&left([1.0, 2.0]));

        let doc = document.borrow();
        let object = doc.object(brush).unwrap();
        assert_eq!(object.vertex(2), Some([1.0, 2.0]));
        assert_eq!(object.vertex(3), Some([-1.0, 2.0]));
        assert_eq!(object.vertex(0), Some([-1.0, -1.0]));
    }

    #[test]
    fn test_drag_cancel_restores_vertices() {
        let (document, mut tool, brush) = setup();
        tool.on_activate();

        assert!(tool.start_mouse_drag(&left([1.0, -1.0])));
        tool.mouse_drag(&left([3.0, -1.0]));
        tool.cancel_mouse_drag();

        assert_eq!(document.borrow().object(brush).unwrap().vertex(1), Some([1.0, -1.0]));
    }

    #[test]
    fn test_cancel_consumed_only_with_selected_handles() {
        let (_, mut tool, _) = setup();
        tool.on_activate();
        assert!(!tool.cancel());

        tool.mouse_up(&left([1.0, 1.0]));
        assert!(tool.cancel());
        assert!(tool.selected_handles().is_empty());
        assert!(!tool.cancel());
    }

    #[test]
    fn test_render_highlights_selected_handles() {
        let (_, mut tool, _) = setup();
        tool.on_activate();
        tool.mouse_up(&left([1.0, 1.0]));

        let mut batch: Vec<RenderCommand> = Vec::new();
        tool.render(&InputState::default(), &RenderContext::new(), &mut batch);

        assert_eq!(batch.len(), 4);
        assert_eq!(
            batch[2],
            RenderCommand::Handle {
                position: [1.0, 1.0],
                color: SELECTED_HANDLE_COLOR,
            }
        );
    }
}
