//! Tool box: modal activation, drag gestures and drag-and-drop routing.
//!
//! The tool box owns no tools. It owns the dispatch state for one editing
//! session: which tool is modal, which tool receives the current mouse drag,
//! which tool is the target of an OS drag-and-drop gesture, and whether
//! dispatch is enabled at all. Hosts call it with the chain of the view that
//! produced the event and the session's `ToolRegistry`.

use std::collections::HashMap;

use void_event::{Notifier, SubscriberId};

use crate::chain::ToolChain;
use crate::config::{ConfigError, ConfigResult, ToolBoxConfig};
use crate::hit::Hits;
use crate::input::InputState;
use crate::render::{RenderBatch, RenderContext};
use crate::tool::{ToolId, ToolRegistry};

/// Broadcast whenever a tool's active state is changed by the tool box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolLifecycleEvent {
    Activated(ToolId),
    Deactivated(ToolId),
}

impl ToolLifecycleEvent {
    pub fn tool(&self) -> ToolId {
        match self {
            ToolLifecycleEvent::Activated(id) | ToolLifecycleEvent::Deactivated(id) => *id,
        }
    }
}

/// Drop target of an OS drag-and-drop gesture together with the payload it
/// accepted on enter.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DropTarget {
    tool: ToolId,
    payload: String,
}

/// Dispatch state machine for one editing session.
pub struct ToolBox {
    modal_receiver: Option<ToolId>,
    drag_receiver: Option<ToolId>,
    drop_receiver: Option<DropTarget>,
    /// Some windowing layers send a leave right before the drop of the same
    /// gesture; the receiver is parked here so the drop can still reach it.
    saved_drop_receiver: Option<DropTarget>,
    deactivate_when: HashMap<ToolId, Vec<ToolId>>,
    enabled: bool,
    lifecycle: Notifier<ToolLifecycleEvent>,
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolBox {
    pub fn new() -> Self {
        Self {
            modal_receiver: None,
            drag_receiver: None,
            drop_receiver: None,
            saved_drop_receiver: None,
            deactivate_when: HashMap::new(),
            enabled: true,
            lifecycle: Notifier::new(),
        }
    }

    /// Build a tool box and register the rules named in `config`.
    pub fn from_config(config: &ToolBoxConfig, registry: &mut ToolRegistry) -> ConfigResult<Self> {
        let mut tool_box = Self::new();
        tool_box.apply_config(config, registry)?;
        Ok(tool_box)
    }

    /// Replace the deactivation rules with those of `config` and take over
    /// its enabled state. Nothing changes unless every rule is valid.
    ///
    /// Closing the gate goes through `disable`, so a running drag is
    /// cancelled first.
    pub fn apply_config(
        &mut self,
        config: &ToolBoxConfig,
        registry: &mut ToolRegistry,
    ) -> ConfigResult<()> {
        let resolve = |name: &str| {
            registry
                .find(name)
                .ok_or_else(|| ConfigError::UnknownTool(name.to_string()))
        };

        let mut rules = Vec::new();
        for rule in &config.deactivation_rules {
            let master = resolve(&rule.master)?;
            for slave_name in &rule.slaves {
                let slave = resolve(slave_name)?;
                if slave == master {
                    return Err(ConfigError::SelfDeactivation(rule.master.clone()));
                }
                rules.push((master, slave));
            }
        }

        self.deactivate_when.clear();
        for (master, slave) in rules {
            self.deactivate_when(master, slave);
        }
        if config.enabled {
            self.enable();
        } else {
            self.disable(registry);
        }
        log::debug!(
            "Applied tool box config ({} rules, enabled: {})",
            config.deactivation_rules.len(),
            config.enabled
        );
        Ok(())
    }

    /// Lifecycle notifications, for panels that follow the active tool.
    pub fn lifecycle_mut(&mut self) -> &mut Notifier<ToolLifecycleEvent> {
        &mut self.lifecycle
    }

    /// Subscribe to lifecycle events.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: FnMut(&ToolLifecycleEvent) + 'static,
    {
        self.lifecycle.subscribe(handler)
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.lifecycle.unsubscribe(id)
    }

    /// Hit-test through the chain. Allowed even while disabled.
    pub fn pick(
        &self,
        chain: &ToolChain,
        registry: &ToolRegistry,
        input: &InputState,
        hits: &mut Hits,
    ) {
        chain.pick(registry, input, hits);
    }

    // ---------------------------------------------------------------------
    // OS drag and drop
    // ---------------------------------------------------------------------

    /// Start an OS drag-and-drop gesture. Any modal tool is deactivated
    /// first. Returns whether some tool accepted the payload.
    ///
    /// # Panics
    /// If a drop receiver from an earlier enter is still recorded.
    pub fn drag_enter(
        &mut self,
        chain: &ToolChain,
        registry: &mut ToolRegistry,
        input: &InputState,
        payload: &str,
    ) -> bool {
        assert!(
            self.drop_receiver.is_none(),
            "drag_enter while a drop receiver is already recorded"
        );

        if !self.enabled {
            return false;
        }

        self.deactivate_all_tools(registry);
        self.drop_receiver = chain
            .drag_enter(registry, input, payload)
            .map(|tool| DropTarget {
                tool,
                payload: payload.to_string(),
            });

        match &self.drop_receiver {
            Some(target) => {
                log::debug!("Drop receiver is '{}'", target.tool);
                true
            }
            None => false,
        }
    }

    /// Forward a move to the drop receiver. Returns false with no receiver.
    pub fn drag_move(&mut self, registry: &mut ToolRegistry, input: &InputState, payload: &str) -> bool {
        let Some(target) = &self.drop_receiver else {
            return false;
        };
        if !self.enabled {
            return false;
        }

        registry.tool_mut(target.tool).drag_move(input, payload);
        true
    }

    /// Notify the receiver that the gesture left the view. The receiver is
    /// kept as the saved drop receiver in case the drop still follows.
    pub fn drag_leave(&mut self, registry: &mut ToolRegistry, input: &InputState) {
        if self.drop_receiver.is_none() || !self.enabled {
            return;
        }

        if let Some(target) = self.drop_receiver.take() {
            registry.tool_mut(target.tool).drag_leave(input);
            log::debug!("Drop receiver '{}' saved after leave", target.tool);
            self.saved_drop_receiver = Some(target);
        }
    }

    /// Deliver the drop. Returns the receiver's result, or false if there is
    /// nothing to drop onto.
    pub fn drag_drop(&mut self, registry: &mut ToolRegistry, input: &InputState, payload: &str) -> bool {
        if self.drop_receiver.is_none() && self.saved_drop_receiver.is_none() {
            return false;
        }
        if !self.enabled {
            return false;
        }

        if self.drop_receiver.is_none() {
            if let Some(saved) = self.saved_drop_receiver.take() {
                log::info!(
                    "Drop arrived after leave; re-entering saved receiver '{}'",
                    saved.tool
                );
                registry.activate(saved.tool);
                registry.tool_mut(saved.tool).drag_enter(input, &saved.payload);
                self.drop_receiver = Some(saved);
            }
        }

        let result = match self.drop_receiver.take() {
            Some(target) => registry.tool_mut(target.tool).drag_drop(input, payload),
            None => false,
        };
        self.saved_drop_receiver = None;
        result
    }

    // ---------------------------------------------------------------------
    // Pointer events
    // ---------------------------------------------------------------------

    /// Broadcast a modifier change to the chain.
    pub fn modifier_key_change(
        &mut self,
        chain: &ToolChain,
        registry: &mut ToolRegistry,
        input: &InputState,
    ) {
        if self.enabled {
            chain.modifier_key_change(registry, input);
        }
    }

    /// Broadcast a button press to the chain.
    pub fn mouse_down(&mut self, chain: &ToolChain, registry: &mut ToolRegistry, input: &InputState) {
        if self.enabled {
            chain.mouse_down(registry, input);
        }
    }

    /// Returns whether a tool handled the click.
    pub fn mouse_up(&mut self, chain: &ToolChain, registry: &mut ToolRegistry, input: &InputState) -> bool {
        if !self.enabled {
            return false;
        }
        chain.mouse_up(registry, input)
    }

    /// Broadcast a double click to the chain.
    pub fn mouse_double_click(
        &mut self,
        chain: &ToolChain,
        registry: &mut ToolRegistry,
        input: &InputState,
    ) {
        if self.enabled {
            chain.mouse_double_click(registry, input);
        }
    }

    /// Broadcast pointer motion to the chain.
    pub fn mouse_move(&mut self, chain: &ToolChain, registry: &mut ToolRegistry, input: &InputState) {
        if self.enabled {
            chain.mouse_move(registry, input);
        }
    }

    /// Broadcast a scroll to the chain.
    pub fn mouse_scroll(&mut self, chain: &ToolChain, registry: &mut ToolRegistry, input: &InputState) {
        if self.enabled {
            chain.mouse_scroll(registry, input);
        }
    }

    // ---------------------------------------------------------------------
    // Mouse drag
    // ---------------------------------------------------------------------

    /// Whether a pointer drag is in progress.
    pub fn dragging(&self) -> bool {
        self.drag_receiver.is_some()
    }

    /// Tool that owns the current pointer drag.
    pub fn drag_receiver(&self) -> Option<ToolId> {
        self.drag_receiver
    }

    /// Offer a drag to the chain. Returns whether a tool claimed it.
    pub fn start_mouse_drag(
        &mut self,
        chain: &ToolChain,
        registry: &mut ToolRegistry,
        input: &InputState,
    ) -> bool {
        if !self.enabled {
            return false;
        }

        self.drag_receiver = chain.start_mouse_drag(registry, input);
        if let Some(receiver) = self.drag_receiver {
            log::debug!("Mouse drag claimed by '{}'", receiver);
        }
        self.drag_receiver.is_some()
    }

    /// Continue the current drag. Returns false if the receiver rejected
    /// the move.
    ///
    /// # Panics
    /// If no drag is in progress or the tool box is disabled.
    pub fn mouse_drag(&mut self, registry: &mut ToolRegistry, input: &InputState) -> bool {
        let receiver = self.expect_drag_receiver("mouse_drag");
        assert!(self.enabled, "mouse_drag while the tool box is disabled");
        registry.tool_mut(receiver).mouse_drag(input)
    }

    /// Finish the current drag and clear the receiver.
    ///
    /// # Panics
    /// If no drag is in progress or the tool box is disabled.
    pub fn end_mouse_drag(&mut self, registry: &mut ToolRegistry, input: &InputState) {
        let receiver = self.expect_drag_receiver("end_mouse_drag");
        assert!(self.enabled, "end_mouse_drag while the tool box is disabled");
        registry.tool_mut(receiver).end_mouse_drag(input);
        self.drag_receiver = None;
        log::debug!("Mouse drag ended by '{}'", receiver);
    }

    /// Abort the current drag and clear the receiver.
    ///
    /// # Panics
    /// If no drag is in progress.
    pub fn cancel_drag(&mut self, registry: &mut ToolRegistry) {
        let receiver = self.expect_drag_receiver("cancel_drag");
        registry.tool_mut(receiver).cancel_mouse_drag();
        self.drag_receiver = None;
        log::debug!("Mouse drag of '{}' cancelled", receiver);
    }

    fn expect_drag_receiver(&self, operation: &str) -> ToolId {
        match self.drag_receiver {
            Some(receiver) => receiver,
            None => panic!("{} called with no mouse drag in progress", operation),
        }
    }

    /// Cancel whatever is most specific: a running drag, then a gesture
    /// inside a tool, then the modal tool. Returns whether anything was
    /// cancelled.
    ///
    /// Tools are not asked while the tool box is disabled. Leaving the modal
    /// tool still works.
    pub fn cancel(&mut self, chain: &ToolChain, registry: &mut ToolRegistry) -> bool {
        if self.dragging() {
            self.cancel_drag(registry);
            return true;
        }

        if self.enabled && chain.cancel(registry) {
            return true;
        }

        if self.any_tool_active() {
            self.deactivate_all_tools(registry);
            return true;
        }

        false
    }

    // ---------------------------------------------------------------------
    // Modal tools
    // ---------------------------------------------------------------------

    /// Register that activating `master` deactivates `slave`, and that
    /// deactivating `master` activates `slave` again.
    ///
    /// # Panics
    /// If `master` and `slave` are the same tool.
    pub fn deactivate_when(&mut self, master: ToolId, slave: ToolId) {
        assert!(master != slave, "tool '{}' cannot deactivate itself", master);
        self.deactivate_when.entry(master).or_default().push(slave);
    }

    /// Slaves registered against `master`, in registration order.
    pub fn slaves_of(&self, master: ToolId) -> &[ToolId] {
        self.deactivate_when
            .get(&master)
            .map(|slaves| slaves.as_slice())
            .unwrap_or(&[])
    }

    /// Whether some tool is modal.
    pub fn any_tool_active(&self) -> bool {
        self.modal_receiver.is_some()
    }

    pub fn tool_active(&self, tool: ToolId) -> bool {
        self.modal_receiver == Some(tool)
    }

    /// The modal tool, if any.
    pub fn modal_tool(&self) -> Option<ToolId> {
        self.modal_receiver
    }

    /// Make `tool` the modal tool, or switch it off if it already is.
    /// `None` switches off whatever tool is modal.
    pub fn toggle_tool(&mut self, registry: &mut ToolRegistry, tool: Option<ToolId>) {
        if let Some(current) = self.modal_receiver.take() {
            self.deactivate_tool(registry, current);
            if tool == Some(current) {
                return;
            }
        }

        if let Some(tool) = tool {
            if self.activate_tool(registry, tool) {
                log::debug!("Tool '{}' is now modal", tool);
            } else {
                log::debug!("Tool '{}' refused activation", tool);
            }
        }
    }

    /// Switch off the modal tool, restoring its slaves.
    pub fn deactivate_all_tools(&mut self, registry: &mut ToolRegistry) {
        self.toggle_tool(registry, None);
    }

    fn activate_tool(&mut self, registry: &mut ToolRegistry, tool: ToolId) -> bool {
        if !registry.activate(tool) {
            return false;
        }

        self.modal_receiver = Some(tool);
        self.lifecycle.notify(&ToolLifecycleEvent::Activated(tool));

        if let Some(slaves) = self.deactivate_when.get(&tool) {
            for slave in slaves {
                registry.deactivate(*slave);
                self.lifecycle.notify(&ToolLifecycleEvent::Deactivated(*slave));
            }
        }
        true
    }

    fn deactivate_tool(&mut self, registry: &mut ToolRegistry, tool: ToolId) {
        registry.deactivate(tool);
        self.lifecycle.notify(&ToolLifecycleEvent::Deactivated(tool));

        if let Some(slaves) = self.deactivate_when.get(&tool) {
            for slave in slaves {
                registry.activate(*slave);
                self.lifecycle.notify(&ToolLifecycleEvent::Activated(*slave));
            }
        }
        log::debug!("Tool '{}' deactivated", tool);
    }

    // ---------------------------------------------------------------------
    // Enabled state
    // ---------------------------------------------------------------------

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Open the gate.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Close the gate. A running drag is cancelled first.
    pub fn disable(&mut self, registry: &mut ToolRegistry) {
        if self.dragging() {
            self.cancel_drag(registry);
        }
        self.enabled = false;
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    pub fn set_render_options(
        &self,
        chain: &ToolChain,
        registry: &ToolRegistry,
        input: &InputState,
        render_context: &mut RenderContext,
    ) {
        if self.enabled {
            chain.set_render_options(registry, input, render_context);
        }
    }

    /// Let active render tools submit their primitives.
    pub fn render_tools(
        &self,
        chain: &ToolChain,
        registry: &ToolRegistry,
        input: &InputState,
        render_context: &RenderContext,
        render_batch: &mut dyn RenderBatch,
    ) {
        if self.enabled {
            chain.render(registry, input, render_context, render_batch);
        }
    }

    /// Current OS drag-and-drop target, if a gesture is over the view.
    pub fn drop_receiver(&self) -> Option<ToolId> {
        self.drop_receiver.as_ref().map(|target| target.tool)
    }
}

impl std::fmt::Debug for ToolBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBox")
            .field("modal_receiver", &self.modal_receiver)
            .field("drag_receiver", &self.drag_receiver)
            .field("drop_receiver", &self.drop_receiver())
            .field(
                "saved_drop_receiver",
                &self.saved_drop_receiver.as_ref().map(|target| target.tool),
            )
            .field("enabled", &self.enabled)
            .finish()
    }
}
