//! Void Engine Level Editor - Map View Tools
//!
//! The interactive tools of a 2D map view and the session that drives them.
//!
//! ## Features
//!
//! - **Selection**: click, shift-click toggle, click on empty space clears
//! - **Move Objects**: drag the selection, escape puts it back
//! - **Rotate Objects**: modal, snapped rotation around a movable centre
//! - **Vertex Editing**: modal, pick and drag brush vertex handles
//! - **Entity Creation**: drop `entity:<classname>` payloads onto the view
//! - **Tool Pages**: side panel that follows the modal tool
//!
//! ## Architecture
//!
//! ```text
//! Map view → MapViewToolBox → ToolBox → ToolChain → tools → MapDocument
//!                                 │
//!                                 └→ lifecycle events → ToolPageBook
//! ```
//!
//! Tool box settings and deactivation rules come from `EditorPreferences`.

pub mod core;
pub mod panels;
pub mod session;
pub mod tools;

// Re-export commonly used types
pub use self::core::{
    EditorPreferences, MapDocument, MapObject, ObjectId, ObjectKind, PreferencesError,
    Selection, SelectionMode, SharedDocument, VertexHandle,
};

pub use panels::{ToolPage, ToolPageBook};

pub use session::MapViewToolBox;

pub use tools::{
    CreateEntityTool, MoveObjectsTool, RotateObjectsTool, SelectionTool, VertexTool,
};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
