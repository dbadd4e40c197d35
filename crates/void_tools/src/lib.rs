//! # void_tools - Viewport Tool Dispatch
//!
//! Routes pointer, modifier and drag-and-drop events from an editing
//! viewport to a set of interacting tools.
//!
//! ## Architecture
//!
//! ```text
//! Viewport → InputState → ToolBox → ToolChain → Tool
//!                            │
//!                            └→ Notifier<ToolLifecycleEvent> → panels
//! ```
//!
//! - **ToolRegistry**: owns the tools of a session and their active flags
//! - **ToolChain**: ordered tool ids for one view; first claim wins for
//!   claim events, everything else is broadcast
//! - **ToolBox**: at most one modal tool, the mouse drag receiver, the
//!   drag-and-drop receiver and the enabled gate
//!
//! Everything runs synchronously on the thread driving the viewport.

pub mod chain;
pub mod config;
pub mod hit;
pub mod input;
pub mod render;
pub mod tool;
pub mod tool_box;

pub use chain::ToolChain;
pub use config::{ConfigError, ConfigResult, DeactivationRule, ToolBoxConfig};
pub use hit::{Hit, HitType, Hits};
pub use input::{InputState, ModifierKeys, MouseButtons};
pub use render::{Color, RenderBatch, RenderCommand, RenderContext, RenderOptions};
pub use tool::{AsAny, Capabilities, Tool, ToolId, ToolRegistry};
pub use tool_box::{ToolBox, ToolLifecycleEvent};

/// Prelude
pub mod prelude {
    pub use crate::chain::ToolChain;
    pub use crate::hit::{Hit, HitType, Hits};
    pub use crate::input::{InputState, ModifierKeys, MouseButtons};
    pub use crate::render::{RenderBatch, RenderCommand, RenderContext};
    pub use crate::tool::{Capabilities, Tool, ToolId, ToolRegistry};
    pub use crate::tool_box::{ToolBox, ToolLifecycleEvent};
}
