//! Tool trait and registry.

use std::any::Any;
use std::collections::HashMap;

use crate::hit::Hits;
use crate::input::InputState;
use crate::render::{RenderBatch, RenderContext};

/// Unique identifier for a tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolId(pub &'static str);

impl ToolId {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags::bitflags! {
    /// Capability-gated events a tool takes part in.
    ///
    /// Pointer and modifier broadcasts reach every active tool regardless.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const PICK        = 1 << 0;
        const DRAG        = 1 << 1;
        const DROP_TARGET = 1 << 2;
        const RENDER      = 1 << 3;
        const CANCEL      = 1 << 4;
    }
}

/// Upcast to `Any` so concrete tools can be recovered from the registry.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A tool for viewport interaction.
///
/// Every hook has a default: claim hooks decline and notifications are
/// ignored, so a tool only implements what it declares in `capabilities`.
/// A tool never flips its own active state; the tool box does that by
/// calling `on_activate`/`on_deactivate`.
pub trait Tool: AsAny {
    /// Unique identifier for this tool.
    fn id(&self) -> ToolId;

    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Active state given to the tool when it is registered.
    fn initially_active(&self) -> bool {
        false
    }

    /// Called when the tool is about to become active. Returning false
    /// refuses activation.
    fn on_activate(&mut self) -> bool {
        true
    }

    /// Called when the tool becomes inactive. May be called on a tool that
    /// is already inactive.
    fn on_deactivate(&mut self) {}

    /// Contribute hits for whatever this tool has under the pointer.
    fn pick(&self, _input: &InputState, _hits: &mut Hits) {}

    fn modifier_key_change(&mut self, _input: &InputState) {}

    fn mouse_down(&mut self, _input: &InputState) {}

    /// Returns true if the tool handled the click.
    fn mouse_up(&mut self, _input: &InputState) -> bool {
        false
    }

    fn mouse_double_click(&mut self, _input: &InputState) {}

    fn mouse_move(&mut self, _input: &InputState) {}

    fn mouse_scroll(&mut self, _input: &InputState) {}

    /// Returns true to claim the drag gesture.
    fn start_mouse_drag(&mut self, _input: &InputState) -> bool {
        false
    }

    /// Returns false if the move was rejected.
    fn mouse_drag(&mut self, _input: &InputState) -> bool {
        true
    }

    fn end_mouse_drag(&mut self, _input: &InputState) {}

    fn cancel_mouse_drag(&mut self) {}

    /// Returns true to accept an OS drag-and-drop payload.
    fn drag_enter(&mut self, _input: &InputState, _payload: &str) -> bool {
        false
    }

    fn drag_move(&mut self, _input: &InputState, _payload: &str) {}

    fn drag_leave(&mut self, _input: &InputState) {}

    /// Returns whether the drop was performed.
    fn drag_drop(&mut self, _input: &InputState, _payload: &str) -> bool {
        false
    }

    fn set_render_options(&self, _input: &InputState, _render_context: &mut RenderContext) {}

    fn render(
        &self,
        _input: &InputState,
        _render_context: &RenderContext,
        _render_batch: &mut dyn RenderBatch,
    ) {
    }

    /// Returns true if the tool consumed a generic cancel, e.g. by backing
    /// out of a multi-step gesture.
    fn cancel(&mut self) -> bool {
        false
    }
}

struct ToolSlot {
    tool: Box<dyn Tool>,
    active: bool,
}

/// Session-owned store of tools and their active state.
///
/// Chains and the tool box refer to tools by `ToolId` only.
pub struct ToolRegistry {
    tools: HashMap<ToolId, ToolSlot>,
    order: Vec<ToolId>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool.
    ///
    /// # Panics
    /// If a tool with the same id is already registered.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> ToolId {
        let id = tool.id();
        assert!(
            !self.tools.contains_key(&id),
            "tool '{}' is already registered",
            id
        );

        let active = tool.initially_active();
        log::debug!("Registered tool '{}' (active: {})", id, active);
        self.order.push(id);
        self.tools.insert(id, ToolSlot { tool, active });
        id
    }

    pub fn contains(&self, id: ToolId) -> bool {
        self.tools.contains_key(&id)
    }

    /// Whether the tool's active flag is set. Unknown tools are inactive.
    pub fn is_active(&self, id: ToolId) -> bool {
        self.tools.get(&id).map(|slot| slot.active).unwrap_or(false)
    }

    /// Find a tool by its name.
    pub fn find(&self, name: &str) -> Option<ToolId> {
        self.order.iter().copied().find(|id| id.name() == name)
    }

    /// All registered tool IDs in registration order.
    pub fn ids(&self) -> &[ToolId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get a tool by ID.
    pub fn tool(&self, id: ToolId) -> Option<&dyn Tool> {
        self.tools.get(&id).map(|slot| slot.tool.as_ref())
    }

    /// Get a concrete tool by ID.
    pub fn get<T: Tool>(&self, id: ToolId) -> Option<&T> {
        self.tools.get(&id)?.tool.as_ref().as_any().downcast_ref::<T>()
    }

    /// Get a concrete tool mutably by ID.
    pub fn get_mut<T: Tool>(&mut self, id: ToolId) -> Option<&mut T> {
        self.tools
            .get_mut(&id)?
            .tool
            .as_mut()
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Tool that currently takes events from a chain.
    pub(crate) fn active_tool(&self, id: ToolId) -> Option<&dyn Tool> {
        self.tools
            .get(&id)
            .filter(|slot| slot.active)
            .map(|slot| slot.tool.as_ref())
    }

    /// Mutable tool that currently takes events from a chain.
    pub(crate) fn active_tool_mut(&mut self, id: ToolId) -> Option<&mut (dyn Tool + 'static)> {
        match self.tools.get_mut(&id) {
            Some(slot) if slot.active => Some(slot.tool.as_mut()),
            _ => None,
        }
    }

    /// Mutable tool regardless of its active state.
    ///
    /// # Panics
    /// If the tool is not registered.
    pub(crate) fn tool_mut(&mut self, id: ToolId) -> &mut (dyn Tool + 'static) {
        match self.tools.get_mut(&id) {
            Some(slot) => slot.tool.as_mut(),
            None => panic!("tool '{}' is not registered", id),
        }
    }

    /// Run the activation hook and set the active flag if it accepts.
    pub(crate) fn activate(&mut self, id: ToolId) -> bool {
        let slot = self.slot_mut(id);
        let accepted = slot.tool.on_activate();
        if accepted {
            slot.active = true;
        }
        accepted
    }

    /// Run the deactivation hook and clear the active flag.
    pub(crate) fn deactivate(&mut self, id: ToolId) {
        let slot = self.slot_mut(id);
        slot.tool.on_deactivate();
        slot.active = false;
    }

    fn slot_mut(&mut self, id: ToolId) -> &mut ToolSlot {
        match self.tools.get_mut(&id) {
            Some(slot) => slot,
            None => panic!("tool '{}' is not registered", id),
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for id in &self.order {
            list.entry(&(id.name(), self.is_active(*id)));
        }
        list.finish()
    }
}
