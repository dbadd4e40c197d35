//! The tool session behind one map view.
//!
//! `MapViewToolBox` owns the tools, their chain and the tool box, and is
//! the only thing the view talks to. The view forwards its input events
//! here; panels read the current tool page.

use std::cell::RefCell;
use std::rc::Rc;

use void_event::SubscriberId;
use void_tools::{
    ConfigResult, Hits, InputState, RenderBatch, RenderContext, ToolBox, ToolChain, ToolId,
    ToolRegistry,
};

use crate::core::{EditorPreferences, SharedDocument};
use crate::panels::{ToolPage, ToolPageBook};
use crate::tools::{
    CreateEntityTool, MoveObjectsTool, RotateObjectsTool, SelectionTool, VertexTool,
    CREATE_ENTITY_TOOL_ID, MOVE_OBJECTS_TOOL_ID, ROTATE_OBJECTS_TOOL_ID, SELECTION_TOOL_ID,
    VERTEX_TOOL_ID,
};

pub struct MapViewToolBox {
    document: SharedDocument,
    registry: ToolRegistry,
    chain: ToolChain,
    tool_box: ToolBox,
    pages: Rc<RefCell<ToolPageBook>>,
    page_observer: Option<SubscriberId>,
}

impl MapViewToolBox {
    /// Create the map view tools and apply the tool box settings from
    /// `preferences`.
    pub fn new(document: SharedDocument, preferences: &EditorPreferences) -> ConfigResult<Self> {
        let radius = preferences.handle_radius;
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(VertexTool::new(document.clone(), radius)));
        registry.register(Box::new(RotateObjectsTool::new(
            document.clone(),
            radius,
            preferences.rotation_snap,
        )));
        registry.register(Box::new(CreateEntityTool::new(document.clone())));
        registry.register(Box::new(MoveObjectsTool::new(document.clone(), radius)));
        registry.register(Box::new(SelectionTool::new(document.clone(), radius)));

        let chain = ToolChain::new()
            .with(VERTEX_TOOL_ID)
            .with(ROTATE_OBJECTS_TOOL_ID)
            .with(CREATE_ENTITY_TOOL_ID)
            .with(MOVE_OBJECTS_TOOL_ID)
            .with(SELECTION_TOOL_ID);

        let tool_box = ToolBox::from_config(&preferences.tool_box, &mut registry)?;

        let mut session = Self {
            document,
            registry,
            chain,
            tool_box,
            pages: Rc::new(RefCell::new(ToolPageBook::new())),
            page_observer: None,
        };
        session.bind_observers();
        log::debug!("Map view tool box ready: {:?}", session.chain.tools());
        Ok(session)
    }

    fn bind_observers(&mut self) {
        let pages = self.pages.clone();
        let id = self
            .tool_box
            .subscribe(move |event| pages.borrow_mut().handle_event(event));
        self.page_observer = Some(id);
    }

    fn unbind_observers(&mut self) {
        if let Some(id) = self.page_observer.take() {
            self.tool_box.unsubscribe(id);
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn chain(&self) -> &ToolChain {
        &self.chain
    }

    pub fn tool_box(&self) -> &ToolBox {
        &self.tool_box
    }

    pub fn current_page(&self) -> ToolPage {
        self.pages.borrow().current_page()
    }

    pub fn pages(&self) -> Rc<RefCell<ToolPageBook>> {
        self.pages.clone()
    }

    // ---------------------------------------------------------------------
    // Modal tools
    // ---------------------------------------------------------------------

    pub fn toggle_rotate_objects_tool(&mut self) {
        self.tool_box
            .toggle_tool(&mut self.registry, Some(ROTATE_OBJECTS_TOOL_ID));
    }

    pub fn rotate_objects_tool_active(&self) -> bool {
        self.tool_box.tool_active(ROTATE_OBJECTS_TOOL_ID)
    }

    /// # Panics
    /// If the rotate tool is not active.
    pub fn rotate_tool_angle(&self) -> f32 {
        self.rotate_tool().angle()
    }

    /// # Panics
    /// If the rotate tool is not active.
    pub fn rotate_tool_center(&self) -> [f32; 2] {
        self.rotate_tool().center()
    }

    /// # Panics
    /// If the rotate tool is not active.
    pub fn move_rotation_center(&mut self, delta: [f32; 2]) {
        assert!(
            self.rotate_objects_tool_active(),
            "move_rotation_center while the rotate tool is not active"
        );
        match self
            .registry
            .get_mut::<RotateObjectsTool>(ROTATE_OBJECTS_TOOL_ID)
        {
            Some(tool) => tool.move_center(delta),
            None => unreachable!("rotate tool is registered by MapViewToolBox::new"),
        }
    }

    fn rotate_tool(&self) -> &RotateObjectsTool {
        assert!(
            self.rotate_objects_tool_active(),
            "the rotate tool is not active"
        );
        match self.registry.get::<RotateObjectsTool>(ROTATE_OBJECTS_TOOL_ID) {
            Some(tool) => tool,
            None => unreachable!("rotate tool is registered by MapViewToolBox::new"),
        }
    }

    pub fn toggle_vertex_tool(&mut self) {
        self.tool_box
            .toggle_tool(&mut self.registry, Some(VERTEX_TOOL_ID));
    }

    pub fn vertex_tool_active(&self) -> bool {
        self.tool_box.tool_active(VERTEX_TOOL_ID)
    }

    pub fn vertex_tool(&self) -> Option<&VertexTool> {
        self.registry.get::<VertexTool>(VERTEX_TOOL_ID)
    }

    pub fn modal_tool(&self) -> Option<ToolId> {
        self.tool_box.modal_tool()
    }

    pub fn deactivate_all_tools(&mut self) {
        self.tool_box.deactivate_all_tools(&mut self.registry);
    }

    // ---------------------------------------------------------------------
    // Input forwarding
    // ---------------------------------------------------------------------

    /// Everything the active tools have under the pointer.
    pub fn pick(&self, input: &InputState) -> Hits {
        let mut hits = Hits::new();
        self.tool_box
            .pick(&self.chain, &self.registry, input, &mut hits);
        hits
    }

    pub fn modifier_key_change(&mut self, input: &InputState) {
        self.tool_box
            .modifier_key_change(&self.chain, &mut self.registry, input);
    }

    pub fn mouse_down(&mut self, input: &InputState) {
        self.tool_box
            .mouse_down(&self.chain, &mut self.registry, input);
    }

    pub fn mouse_up(&mut self, input: &InputState) -> bool {
        self.tool_box
            .mouse_up(&self.chain, &mut self.registry, input)
    }

    pub fn mouse_double_click(&mut self, input: &InputState) {
        self.tool_box
            .mouse_double_click(&self.chain, &mut self.registry, input);
    }

    pub fn mouse_move(&mut self, input: &InputState) {
        self.tool_box
            .mouse_move(&self.chain, &mut self.registry, input);
    }

    pub fn mouse_scroll(&mut self, input: &InputState) {
        self.tool_box
            .mouse_scroll(&self.chain, &mut self.registry, input);
    }

    pub fn start_mouse_drag(&mut self, input: &InputState) -> bool {
        self.tool_box
            .start_mouse_drag(&self.chain, &mut self.registry, input)
    }

    pub fn mouse_drag(&mut self, input: &InputState) -> bool {
        self.tool_box.mouse_drag(&mut self.registry, input)
    }

    pub fn end_mouse_drag(&mut self, input: &InputState) {
        self.tool_box.end_mouse_drag(&mut self.registry, input);
    }

    pub fn cancel_drag(&mut self) {
        self.tool_box.cancel_drag(&mut self.registry);
    }

    pub fn dragging(&self) -> bool {
        self.tool_box.dragging()
    }

    /// Escape: cancel the drag, then a tool gesture, then the modal tool.
    pub fn cancel(&mut self) -> bool {
        self.tool_box.cancel(&self.chain, &mut self.registry)
    }

    pub fn drag_enter(&mut self, input: &InputState, payload: &str) -> bool {
        self.tool_box
            .drag_enter(&self.chain, &mut self.registry, input, payload)
    }

    pub fn drag_move(&mut self, input: &InputState, payload: &str) -> bool {
        self.tool_box.drag_move(&mut self.registry, input, payload)
    }

    pub fn drag_leave(&mut self, input: &InputState) {
        self.tool_box.drag_leave(&mut self.registry, input);
    }

    pub fn drag_drop(&mut self, input: &InputState, payload: &str) -> bool {
        self.tool_box.drag_drop(&mut self.registry, input, payload)
    }

    // ---------------------------------------------------------------------
    // Enabled state and rendering
    // ---------------------------------------------------------------------

    pub fn enabled(&self) -> bool {
        self.tool_box.enabled()
    }

    pub fn enable(&mut self) {
        self.tool_box.enable();
    }

    pub fn disable(&mut self) {
        self.tool_box.disable(&mut self.registry);
    }

    /// Let the tools adjust the render options, then draw them into
    /// `render_batch`. Returns the options used.
    pub fn render(&self, input: &InputState, render_batch: &mut dyn RenderBatch) -> RenderContext {
        let mut render_context = RenderContext::new();
        self.tool_box
            .set_render_options(&self.chain, &self.registry, input, &mut render_context);
        self.tool_box.render_tools(
            &self.chain,
            &self.registry,
            input,
            &render_context,
            render_batch,
        );
        render_context
    }
}

impl Drop for MapViewToolBox {
    fn drop(&mut self) {
        self.unbind_observers();
    }
}

impl std::fmt::Debug for MapViewToolBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapViewToolBox")
            .field("chain", &self.chain)
            .field("tool_box", &self.tool_box)
            .field("current_page", &self.current_page())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MapDocument, SelectionMode};

    fn session_with_selection() -> MapViewToolBox {
        let document = MapDocument::new().into_shared();
        {
            let mut doc = document.borrow_mut();
            let id = doc.add_brush([0.0, 0.0], vec![[-1.0, -1.0], [1.0, 1.0]]);
            doc.selection_mut().select(id, SelectionMode::Replace);
        }
        MapViewToolBox::new(document, &EditorPreferences::default()).unwrap()
    }

    #[test]
    fn test_chain_order() {
        let session = session_with_selection();
        assert_eq!(
            session.chain().tools(),
            &[
                VERTEX_TOOL_ID,
                ROTATE_OBJECTS_TOOL_ID,
                CREATE_ENTITY_TOOL_ID,
                MOVE_OBJECTS_TOOL_ID,
                SELECTION_TOOL_ID,
            ]
        );
    }

    #[test]
    fn test_default_rules_and_initial_state() {
        let session = session_with_selection();
        let registry = session.registry();

        assert!(registry.is_active(SELECTION_TOOL_ID));
        assert!(registry.is_active(MOVE_OBJECTS_TOOL_ID));
        assert!(registry.is_active(CREATE_ENTITY_TOOL_ID));
        assert!(!registry.is_active(ROTATE_OBJECTS_TOOL_ID));
        assert!(!registry.is_active(VERTEX_TOOL_ID));
        assert_eq!(
            session.tool_box().slaves_of(ROTATE_OBJECTS_TOOL_ID),
            &[MOVE_OBJECTS_TOOL_ID]
        );
        assert_eq!(
            session.tool_box().slaves_of(VERTEX_TOOL_ID),
            &[MOVE_OBJECTS_TOOL_ID]
        );
        assert_eq!(session.modal_tool(), None);
    }

    #[test]
    fn test_bad_preferences_fail_construction() {
        let mut prefs = EditorPreferences::default();
        prefs.tool_box.deactivation_rules[0].master = "clip".to_string();

        let result = MapViewToolBox::new(MapDocument::new().into_shared(), &prefs);
        assert!(result.is_err());
    }

    #[test]
    fn test_drop_unbinds_page_observer() {
        let session = session_with_selection();
        let pages = session.pages();
        assert_eq!(Rc::strong_count(&pages), 3);

        drop(session);
        assert_eq!(Rc::strong_count(&pages), 1);
    }

    #[test]
    #[should_panic(expected = "not active")]
    fn test_rotate_angle_requires_active_tool() {
        let session = session_with_selection();
        session.rotate_tool_angle();
    }
}
