//! Drop target that creates point entities from dragged entity definitions.

use void_tools::{
    Capabilities, Color, InputState, RenderBatch, RenderCommand, RenderContext, Tool, ToolId,
};

use crate::core::{ObjectId, SelectionMode, SharedDocument};

pub const CREATE_ENTITY_TOOL_ID: ToolId = ToolId("create_entity");

/// Payloads this tool accepts look like `entity:<classname>`.
pub const ENTITY_PAYLOAD_PREFIX: &str = "entity:";

const PREVIEW_LABEL_COLOR: Color = [0.6, 0.9, 1.0, 1.0];

/// Shows a preview entity that follows the pointer while an entity
/// definition is dragged over the view, and keeps it when dropped.
pub struct CreateEntityTool {
    document: SharedDocument,
    preview: Option<ObjectId>,
}

impl CreateEntityTool {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            document,
            preview: None,
        }
    }

    pub fn preview(&self) -> Option<ObjectId> {
        self.preview
    }

    fn classname(payload: &str) -> Option<&str> {
        payload
            .strip_prefix(ENTITY_PAYLOAD_PREFIX)
            .filter(|classname| !classname.is_empty())
    }

    fn remove_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.document.borrow_mut().remove(preview);
        }
    }
}

impl Tool for CreateEntityTool {
    fn id(&self) -> ToolId {
        CREATE_ENTITY_TOOL_ID
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::DROP_TARGET | Capabilities::RENDER
    }

    fn initially_active(&self) -> bool {
        true
    }

    fn on_deactivate(&mut self) {
        self.remove_preview();
    }

    fn drag_enter(&mut self, input: &InputState, payload: &str) -> bool {
        let Some(classname) = Self::classname(payload) else {
            return false;
        };
        self.remove_preview();
        let id = self
            .document
            .borrow_mut()
            .add_entity(classname, input.position());
        self.preview = Some(id);
        log::trace!("Previewing '{}' as {}", classname, id);
        true
    }

    fn drag_move(&mut self, input: &InputState, _payload: &str) {
        if let Some(preview) = self.preview {
            self.document
                .borrow_mut()
                .set_position(preview, input.position());
        }
    }

    fn drag_leave(&mut self, _input: &InputState) {
        self.remove_preview();
    }

    fn drag_drop(&mut self, input: &InputState, _payload: &str) -> bool {
        let Some(preview) = self.preview.take() else {
            return false;
        };
        let mut document = self.document.borrow_mut();
        document.set_position(preview, input.position());
        document.selection_mut().select(preview, SelectionMode::Replace);
        log::info!("Created entity {}", preview);
        true
    }

    fn render(
        &self,
        _input: &InputState,
        _render_context: &RenderContext,
        render_batch: &mut dyn RenderBatch,
    ) {
        let Some(preview) = self.preview else {
            return;
        };
        let document = self.document.borrow();
        let Some(object) = document.object(preview) else {
            return;
        };
        if let Some(classname) = object.classname() {
            render_batch.submit(RenderCommand::Text {
                position: object.position,
                text: classname.to_string(),
                color: PREVIEW_LABEL_COLOR,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MapDocument;

    fn setup() -> (SharedDocument, CreateEntityTool) {
        let document = MapDocument::new().into_shared();
        let tool = CreateEntityTool::new(document.clone());
        (document, tool)
    }

    #[test]
    fn test_rejects_foreign_payloads() {
        let (document, mut tool) = setup();
        let input = InputState::new([0.0, 0.0]);

        assert!(!tool.drag_enter(&input, "texture:base/wall"));
        assert!(!tool.drag_enter(&input, "entity:"));
        assert!(document.borrow().is_empty());
    }

    #[test]
    fn test_preview_follows_pointer_and_drop_commits() {
        let (document, mut tool) = setup();

        assert!(tool.drag_enter(&InputState::new([0.0, 0.0]), "entity:light"));
        let preview = tool.preview().unwrap();
        tool.drag_move(&InputState::new([2.0, 3.0]), "entity:light");
        assert_eq!(document.borrow().object(preview).unwrap().position, [2.0, 3.0]);

        assert!(tool.drag_drop(&InputState::new([4.0, 4.0]), "entity:light"));

        let doc = document.borrow();
        let object = doc.object(preview).unwrap();
        assert_eq!(object.position, [4.0, 4.0]);
        assert_eq!(object.classname(), Some("light"));
        assert_eq!(doc.selection().selected(), &[preview]);
        assert_eq!(tool.preview(), None);
    }

    #[test]
    fn test_leave_removes_preview() {
        let (document, mut tool) = setup();

        tool.drag_enter(&InputState::new([0.0, 0.0]), "entity:light");
        tool.drag_leave(&InputState::new([9.0, 9.0]));

        assert!(document.borrow().is_empty());
        assert!(!tool.drag_drop(&InputState::new([9.0, 9.0]), "entity:light"));
    }

    #[test]
    fn test_renders_preview_label() {
        let (_, mut tool) = setup();
        let mut batch: Vec<RenderCommand> = Vec::new();
        tool.render(&InputState::default(), &RenderContext::new(), &mut batch);
        assert!(batch.is_empty());

        tool.drag_enter(&InputState::new([1.0, 1.0]), "entity:info_player_start");
        tool.render(&InputState::default(), &RenderContext::new(), &mut batch);

        assert_eq!(
            batch,
            vec![RenderCommand::Text {
                position: [1.0, 1.0],
                text: "info_player_start".to_string(),
                color: PREVIEW_LABEL_COLOR,
            }]
        );
    }
}
