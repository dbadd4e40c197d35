//! Side panels that follow the map view's tools.

mod tool_pages;

pub use tool_pages::{ToolPage, ToolPageBook};
