//! Map document, selection and persistent preferences.
//!
//! Tools share one `MapDocument` through a `SharedDocument` handle; all
//! editing happens on the thread that drives the map view.

mod document;
mod preferences;
mod selection;

pub use document::{MapDocument, MapObject, ObjectKind, SharedDocument, VertexHandle, OBJECT_HIT};
pub(crate) use document::{add, distance, sub};
pub use preferences::{EditorPreferences, PreferencesError, PreferencesResult};
pub use selection::{Selection, SelectionMode};

/// Object identifier within a map document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}
