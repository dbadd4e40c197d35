//! Ordered fan-out of viewport events to tools.
//!
//! Claim events (`mouse_up`, `start_mouse_drag`, `drag_enter`, `cancel`) are
//! offered in chain order and stop at the first tool that accepts. Everything
//! else is broadcast. Only active tools see events, and capability-gated
//! events only reach tools that declare the capability.

use crate::hit::Hits;
use crate::input::InputState;
use crate::render::{RenderBatch, RenderContext};
use crate::tool::{Capabilities, Tool, ToolId, ToolRegistry};

/// Ordered list of tools an event is fanned out to.
///
/// A chain holds ids only; the tools themselves live in a `ToolRegistry`
/// that several chains can share.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolChain {
    tools: Vec<ToolId>,
}

impl ToolChain {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Builder form of `append`.
    pub fn with(mut self, tool: ToolId) -> Self {
        self.append(tool);
        self
    }

    /// Add a tool to the end of the chain.
    pub fn append(&mut self, tool: ToolId) {
        debug_assert!(!self.tools.contains(&tool), "tool '{}' is already chained", tool);
        self.tools.push(tool);
    }

    pub fn tools(&self) -> &[ToolId] {
        &self.tools
    }

    pub fn contains(&self, tool: ToolId) -> bool {
        self.tools.contains(&tool)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn pick(&self, registry: &ToolRegistry, input: &InputState, hits: &mut Hits) {
        for tool in self.capable(registry, Capabilities::PICK) {
            tool.pick(input, hits);
        }
    }

    pub fn modifier_key_change(&self, registry: &mut ToolRegistry, input: &InputState) {
        self.broadcast(registry, |tool| tool.modifier_key_change(input));
    }

    pub fn mouse_down(&self, registry: &mut ToolRegistry, input: &InputState) {
        self.broadcast(registry, |tool| tool.mouse_down(input));
    }

    pub fn mouse_up(&self, registry: &mut ToolRegistry, input: &InputState) -> bool {
        self.claim(registry, Capabilities::empty(), |tool| tool.mouse_up(input))
            .is_some()
    }

    pub fn mouse_double_click(&self, registry: &mut ToolRegistry, input: &InputState) {
        self.broadcast(registry, |tool| tool.mouse_double_click(input));
    }

    pub fn mouse_move(&self, registry: &mut ToolRegistry, input: &InputState) {
        self.broadcast(registry, |tool| tool.mouse_move(input));
    }

    pub fn mouse_scroll(&self, registry: &mut ToolRegistry, input: &InputState) {
        self.broadcast(registry, |tool| tool.mouse_scroll(input));
    }

    /// Returns the tool that claimed the drag.
    pub fn start_mouse_drag(
        &self,
        registry: &mut ToolRegistry,
        input: &InputState,
    ) -> Option<ToolId> {
        self.claim(registry, Capabilities::DRAG, |tool| tool.start_mouse_drag(input))
    }

    /// Returns the tool that accepted the payload.
    pub fn drag_enter(
        &self,
        registry: &mut ToolRegistry,
        input: &InputState,
        payload: &str,
    ) -> Option<ToolId> {
        self.claim(registry, Capabilities::DROP_TARGET, |tool| {
            tool.drag_enter(input, payload)
        })
    }

    pub fn cancel(&self, registry: &mut ToolRegistry) -> bool {
        self.claim(registry, Capabilities::CANCEL, |tool| tool.cancel())
            .is_some()
    }

    pub fn set_render_options(
        &self,
        registry: &ToolRegistry,
        input: &InputState,
        render_context: &mut RenderContext,
    ) {
        for tool in self.capable(registry, Capabilities::RENDER) {
            tool.set_render_options(input, render_context);
        }
    }

    pub fn render(
        &self,
        registry: &ToolRegistry,
        input: &InputState,
        render_context: &RenderContext,
        render_batch: &mut dyn RenderBatch,
    ) {
        for tool in self.capable(registry, Capabilities::RENDER) {
            tool.render(input, render_context, render_batch);
        }
    }

    fn capable<'a>(
        &'a self,
        registry: &'a ToolRegistry,
        capability: Capabilities,
    ) -> impl Iterator<Item = &'a dyn Tool> + 'a {
        self.tools
            .iter()
            .filter_map(move |id| registry.active_tool(*id))
            .filter(move |tool| tool.capabilities().contains(capability))
    }

    fn broadcast<F>(&self, registry: &mut ToolRegistry, mut f: F)
    where
        F: FnMut(&mut dyn Tool),
    {
        for id in &self.tools {
            if let Some(tool) = registry.active_tool_mut(*id) {
                f(tool);
            }
        }
    }

    fn claim<F>(
        &self,
        registry: &mut ToolRegistry,
        capability: Capabilities,
        mut f: F,
    ) -> Option<ToolId>
    where
        F: FnMut(&mut dyn Tool) -> bool,
    {
        for id in &self.tools {
            let Some(tool) = registry.active_tool_mut(*id) else {
                continue;
            };
            if tool.capabilities().contains(capability) && f(tool) {
                return Some(*id);
            }
        }
        None
    }
}
