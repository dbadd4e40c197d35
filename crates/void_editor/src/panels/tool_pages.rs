//! Tool options side panel.
//!
//! The book shows one page at a time. It listens to tool lifecycle
//! notifications: a tool with its own page brings that page up when it is
//! activated, and when that tool is deactivated the book falls back to the
//! move page.

use void_tools::{ToolId, ToolLifecycleEvent};

use crate::tools::ROTATE_OBJECTS_TOOL_ID;

/// Unique identifier for a page of the tool book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ToolPage {
    #[default]
    Move,
    Rotate,
}

impl ToolPage {
    /// Display name shown in the UI.
    pub fn name(&self) -> &'static str {
        match self {
            ToolPage::Move => "Move Objects",
            ToolPage::Rotate => "Rotate Objects",
        }
    }

    /// The page a tool brings up when it is activated.
    pub fn for_tool(tool: ToolId) -> Option<Self> {
        match tool {
            ROTATE_OBJECTS_TOOL_ID => Some(ToolPage::Rotate),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ToolPageBook {
    current: ToolPage,
    /// Tool whose page is up, if it is not the fallback page
    owner: Option<ToolId>,
    /// Pages shown so far, in order
    history: Vec<ToolPage>,
}

impl ToolPageBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> ToolPage {
        self.current
    }

    pub fn history(&self) -> &[ToolPage] {
        &self.history
    }

    pub fn handle_event(&mut self, event: &ToolLifecycleEvent) {
        match *event {
            ToolLifecycleEvent::Activated(tool) => self.tool_activated(tool),
            ToolLifecycleEvent::Deactivated(tool) => self.tool_deactivated(tool),
        }
    }

    pub fn tool_activated(&mut self, tool: ToolId) {
        if let Some(page) = ToolPage::for_tool(tool) {
            self.owner = Some(tool);
            self.switch_to(page);
        }
    }

    pub fn tool_deactivated(&mut self, tool: ToolId) {
        if self.owner == Some(tool) {
            self.owner = None;
            self.switch_to(ToolPage::Move);
        }
    }

    fn switch_to(&mut self, page: ToolPage) {
        if self.current != page {
            log::trace!("Tool page: {}", page.name());
            self.current = page;
            self.history.push(page);
        }
    }
}
