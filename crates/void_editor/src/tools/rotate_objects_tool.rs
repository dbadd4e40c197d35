//! Rotate tool for turning the selection around a movable centre.

use void_tools::{
    Capabilities, Color, InputState, RenderBatch, RenderCommand, RenderContext, Tool, ToolId,
};

use crate::core::{add, distance, sub, MapObject, SharedDocument};

use super::plain_left;

pub const ROTATE_OBJECTS_TOOL_ID: ToolId = ToolId("rotate_objects");

const CENTER_HANDLE_COLOR: Color = [1.0, 0.8, 0.0, 1.0];
const ANGLE_LABEL_COLOR: Color = [1.0, 1.0, 1.0, 1.0];

enum RotateDrag {
    /// Dragging the centre handle itself.
    Center {
        last_point: [f32; 2],
        original_center: [f32; 2],
    },
    /// Turning the selection. `swept` accumulates heading changes so a drag
    /// may go past a half turn.
    Angle {
        last_heading: f32,
        swept: f32,
        start_angle: f32,
        applied: f32,
        original: Vec<MapObject>,
    },
}

/// Modal rotate tool.
///
/// Refuses activation while nothing is selected. On activation the centre
/// is placed at the middle of the selection. A drag on the centre handle
/// moves it; a drag anywhere else rotates the selection in `snap` degree
/// steps.
pub struct RotateObjectsTool {
    document: SharedDocument,
    handle_radius: f32,
    snap: f32,
    center: [f32; 2],
    angle: f32,
    drag: Option<RotateDrag>,
}

impl RotateObjectsTool {
    pub fn new(document: SharedDocument, handle_radius: f32, snap: f32) -> Self {
        Self {
            document,
            handle_radius,
            snap,
            center: [0.0, 0.0],
            angle: 0.0,
            drag: None,
        }
    }

    pub fn center(&self) -> [f32; 2] {
        self.center
    }

    /// Total rotation applied since activation, in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn move_center(&mut self, delta: [f32; 2]) {
        self.center = add(self.center, delta);
    }

    fn heading(&self, point: [f32; 2]) -> f32 {
        let [x, y] = sub(point, self.center);
        y.atan2(x).to_degrees()
    }
}

fn snap_angle(degrees: f32, snap: f32) -> f32 {
    if snap > 0.0 {
        (degrees / snap).round() * snap
    } else {
        degrees
    }
}

/// Wrap into (-180, 180].
fn normalize(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

impl Tool for RotateObjectsTool {
    fn id(&self) -> ToolId {
        ROTATE_OBJECTS_TOOL_ID
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::DRAG | Capabilities::RENDER
    }

    fn on_activate(&mut self) -> bool {
        let Some(center) = self.document.borrow().selection_center() else {
            log::debug!("Rotate tool needs a selection");
            return false;
        };
        self.center = center;
        self.angle = 0.0;
        self.drag = None;
        true
    }

    fn on_deactivate(&mut self) {
        self.drag = None;
    }

    fn start_mouse_drag(&mut self, input: &InputState) -> bool {
        if !plain_left(input) {
            return false;
        }

        let point = input.position();
        if distance(point, self.center) <= self.handle_radius {
            self.drag = Some(RotateDrag::Center {
                last_point: point,
                original_center: self.center,
            });
            return true;
        }

        let document = self.document.borrow();
        if document.selection().is_empty() {
            return false;
        }
        self.drag = Some(RotateDrag::Angle {
            last_heading: self.heading(point),
            swept: 0.0,
            start_angle: self.angle,
            applied: 0.0,
            original: document.snapshot_selection(),
        });
        true
    }

    fn mouse_drag(&mut self, input: &InputState) -> bool {
        let point = input.position();
        let heading = self.heading(point);
        let center = self.center;
        let snap = self.snap;

        match self.drag.as_mut() {
            Some(RotateDrag::Center { last_point, .. }) => {
                self.center = add(self.center, sub(point, *last_point));
                *last_point = point;
            }
            Some(RotateDrag::Angle {
                last_heading,
                swept,
                start_angle,
                applied,
                ..
            }) => {
                *swept += normalize(heading - *last_heading);
                *last_heading = heading;
                let snapped = snap_angle(*swept, snap);
                if snapped != *applied {
                    self.document
                        .borrow_mut()
                        .rotate_selection(center, snapped - *applied);
                    *applied = snapped;
                }
                self.angle = *start_angle + snapped;
            }
            None => return false,
        }
        true
    }

    fn end_mouse_drag(&mut self, _input: &InputState) {
        if let Some(RotateDrag::Angle { .. }) = self.drag.take() {
            log::debug!("Rotated selection to {} degrees", self.angle);
        }
    }

    fn cancel_mouse_drag(&mut self) {
        match self.drag.take() {
            Some(RotateDrag::Center {
                original_center, ..
            }) => self.center = original_center,
            Some(RotateDrag::Angle {
                start_angle,
                original,
                ..
            }) => {
                self.document.borrow_mut().restore(original);
                self.angle = start_angle;
            }
            None => {}
        }
    }

    fn set_render_options(&self, _input: &InputState, render_context: &mut RenderContext) {
        render_context.set_show_selection_guide();
    }

    fn render(
        &self,
        _input: &InputState,
        _render_context: &RenderContext,
        render_batch: &mut dyn RenderBatch,
    ) {
        render_batch.submit(RenderCommand::Handle {
            position: self.center,
            color: CENTER_HANDLE_COLOR,
        });
        render_batch.submit(RenderCommand::Text {
            position: [self.center[0], self.center[1] + self.handle_radius * 2.0],
            text: format!("{:.0}°", self.angle),
            color: ANGLE_LABEL_COLOR,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MapDocument, ObjectId, SelectionMode};
    use void_tools::MouseButtons;

    fn left(position: [f32; 2]) -> InputState {
        InputState::new(position).with_buttons(MouseButtons::LEFT)
    }

    fn setup(snap: f32) -> (SharedDocument, RotateObjectsTool, ObjectId) {
        let document = MapDocument::new().into_shared();
        let id = document.borrow_mut().add_entity("light", [2.0, 0.0]);
        let tool = RotateObjectsTool::new(document.clone(), 0.5, snap);
        (document, tool, id)
    }

    fn select(document: &SharedDocument, id: ObjectId) {
        document
            .borrow_mut()
            .selection_mut()
            .select(id, SelectionMode::Replace);
    }

    #[test]
    fn test_refuses_without_selection() {
        let (_, mut tool, _) = setup(15.0);
        assert!(!tool.on_activate());
    }

    #[test]
    fn test_activation_centres_on_selection() {
        let (document, mut tool, id) = setup(15.0);
        select(&document, id);

        assert!(tool.on_activate());
        assert_eq!(tool.center(), [2.0, 0.0]);
        assert_eq!(tool.angle(), 0.0);
    }

    #[test]
    fn test_drag_rotates_in_snap_steps() {
        let (document, mut tool, id) = setup(45.0);
        select(&document, id);
        tool.on_activate();
        tool.move_center([-2.0, 0.0]);

        assert!(tool.start_mouse_drag(&left([1.0, 0.0])));
        // 30 degrees snaps to the nearest 45 degree step
        tool.mouse_drag(&left([0.866, 0.5]));
        assert_eq!(tool.angle(), 45.0);
        // 80 degrees rounds to 90
        tool.mouse_drag(&left([0.174, 0.985]));
        tool.end_mouse_drag(&left([0.174, 0.985]));

        assert_eq!(tool.angle(), 90.0);
        let position = document.borrow().object(id).unwrap().position;
        assert!(distance(position, [0.0, 2.0]) < 1e-3);
    }

    #[test]
    fn test_drag_past_half_turn_keeps_accumulating() {
        let (document, mut tool, id) = setup(90.0);
        select(&document, id);
        tool.on_activate();
        tool.move_center([-2.0, 0.0]);

        tool.start_mouse_drag(&left([1.0, 0.0]));
        tool.mouse_drag(&left([0.0, 1.0]));
        tool.mouse_drag(&left([-1.0, 0.0]));
        assert_eq!(tool.angle(), 180.0);
        tool.mouse_drag(&left([0.0, -1.0]));
        tool.end_mouse_drag(&left([0.0, -1.0]));

        assert_eq!(tool.angle(), 270.0);
        let position = document.borrow().object(id).unwrap().position;
        assert!(distance(position, [0.0, -2.0]) < 1e-3);
    }

    #[test]
    fn test_cancel_restores_selection_and_angle() {
        let (document, mut tool, id) = setup(0.0);
        select(&document, id);
        tool.on_activate();
        tool.move_center([-2.0, 0.0]);

        tool.start_mouse_drag(&left([1.0, 0.0]));
        tool.mouse_drag(&left([0.0, 1.0]));
        tool.cancel_mouse_drag();

        assert_eq!(tool.angle(), 0.0);
        assert_eq!(document.borrow().object(id).unwrap().position, [2.0, 0.0]);
    }

    #[test]
    fn test_drag_on_handle_moves_centre() {
        let (document, mut tool, id) = setup(15.0);
        select(&document, id);
        tool.on_activate();

        assert!(tool.start_mouse_drag(&left([2.25, 0.0])));
        tool.mouse_drag(&left([3.25, 1.0]));
        tool.end_mouse_drag(&left([3.25, 1.0]));

        assert_eq!(tool.center(), [3.0, 1.0]);
        assert_eq!(document.borrow().object(id).unwrap().position, [2.0, 0.0]);
    }

    #[test]
    fn test_renders_centre_handle_and_guide() {
        let (document, mut tool, id) = setup(15.0);
        select(&document, id);
        tool.on_activate();

        let mut context = RenderContext::new();
        tool.set_render_options(&InputState::default(), &mut context);
        assert!(context.show_selection_guide());

        let mut batch: Vec<RenderCommand> = Vec::new();
        tool.render(&InputState::default(), &context, &mut batch);
        assert_eq!(
            batch[0],
            RenderCommand::Handle {
                position: [2.0, 0.0],
                color: CENTER_HANDLE_COLOR,
            }
        );
    }
}
