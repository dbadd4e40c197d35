//! The map being edited: brushes and point entities on a 2D plane.

use std::cell::RefCell;
use std::rc::Rc;

use void_tools::{Hit, HitType, Hits};

use super::{ObjectId, Selection};

/// Hit type for whole map objects.
pub const OBJECT_HIT: HitType = HitType::new(1 << 0);

/// Document handle shared by the tools of one session.
pub type SharedDocument = Rc<RefCell<MapDocument>>;

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    /// Vertices are offsets from the object position.
    Brush { vertices: Vec<[f32; 2]> },
    Entity { classname: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapObject {
    pub id: ObjectId,
    pub position: [f32; 2],
    pub kind: ObjectKind,
}

impl MapObject {
    pub fn is_brush(&self) -> bool {
        matches!(self.kind, ObjectKind::Brush { .. })
    }

    pub fn classname(&self) -> Option<&str> {
        match &self.kind {
            ObjectKind::Entity { classname } => Some(classname.as_str()),
            ObjectKind::Brush { .. } => None,
        }
    }

    /// World position of a brush vertex.
    pub fn vertex(&self, index: usize) -> Option<[f32; 2]> {
        match &self.kind {
            ObjectKind::Brush { vertices } => vertices
                .get(index)
                .map(|offset| add(self.position, *offset)),
            ObjectKind::Entity { .. } => None,
        }
    }

    /// World positions of all brush vertices. Empty for entities.
    pub fn vertices(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        let offsets: &[[f32; 2]] = match &self.kind {
            ObjectKind::Brush { vertices } => vertices,
            ObjectKind::Entity { .. } => &[],
        };
        offsets.iter().map(move |offset| add(self.position, *offset))
    }
}

/// One vertex of one brush.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexHandle {
    pub object: ObjectId,
    pub index: usize,
}

impl VertexHandle {
    pub fn new(object: ObjectId, index: usize) -> Self {
        Self { object, index }
    }

    /// Pack into a `Hit::target`.
    pub fn to_hit_target(self) -> u64 {
        (u64::from(self.object.0) << 32) | (self.index as u64 & 0xFFFF_FFFF)
    }

    pub fn from_hit_target(target: u64) -> Self {
        Self {
            object: ObjectId((target >> 32) as u32),
            index: (target & 0xFFFF_FFFF) as usize,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapDocument {
    objects: Vec<MapObject>,
    selection: Selection,
    next_id: u32,
}

impl MapDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    pub fn add_brush(&mut self, position: [f32; 2], vertices: Vec<[f32; 2]>) -> ObjectId {
        self.add(position, ObjectKind::Brush { vertices })
    }

    pub fn add_entity(&mut self, classname: impl Into<String>, position: [f32; 2]) -> ObjectId {
        self.add(
            position,
            ObjectKind::Entity {
                classname: classname.into(),
            },
        )
    }

    fn add(&mut self, position: [f32; 2], kind: ObjectKind) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.objects.push(MapObject { id, position, kind });
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<MapObject> {
        let index = self.objects.iter().position(|object| object.id == id)?;
        self.selection.remove(id);
        Some(self.objects.remove(index))
    }

    pub fn object(&self, id: ObjectId) -> Option<&MapObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut MapObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn selected_objects(&self) -> impl Iterator<Item = &MapObject> + '_ {
        self.objects
            .iter()
            .filter(move |object| self.selection.is_selected(object.id))
    }

    pub fn has_selected_brush(&self) -> bool {
        self.selected_objects().any(MapObject::is_brush)
    }

    /// Average position of the selected objects.
    pub fn selection_center(&self) -> Option<[f32; 2]> {
        let mut sum = [0.0, 0.0];
        let mut count = 0usize;
        for object in self.selected_objects() {
            sum = add(sum, object.position);
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some([sum[0] / count as f32, sum[1] / count as f32])
    }

    /// Add an `OBJECT_HIT` for every object within `radius` of `point`.
    pub fn pick_objects(&self, point: [f32; 2], radius: f32, hits: &mut Hits) {
        for object in &self.objects {
            let distance = distance(point, object.position);
            if distance <= radius {
                hits.add(Hit::new(
                    OBJECT_HIT,
                    distance,
                    object.position,
                    u64::from(object.id.0),
                ));
            }
        }
    }

    /// Nearest object within `radius` of `point`.
    pub fn object_at(&self, point: [f32; 2], radius: f32) -> Option<ObjectId> {
        let mut hits = Hits::new();
        self.pick_objects(point, radius, &mut hits);
        hits.first_of(OBJECT_HIT).map(|hit| ObjectId(hit.target as u32))
    }

    pub fn set_position(&mut self, id: ObjectId, position: [f32; 2]) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                object.position = position;
                true
            }
            None => false,
        }
    }

    pub fn translate_selection(&mut self, delta: [f32; 2]) {
        let selection = &self.selection;
        for object in self.objects.iter_mut() {
            if selection.is_selected(object.id) {
                object.position = add(object.position, delta);
            }
        }
    }

    /// Rotate the selected objects counter-clockwise around `center`.
    pub fn rotate_selection(&mut self, center: [f32; 2], degrees: f32) {
        let selection = &self.selection;
        for object in self.objects.iter_mut() {
            if !selection.is_selected(object.id) {
                continue;
            }
            object.position = rotate(object.position, center, degrees);
            if let ObjectKind::Brush { vertices } = &mut object.kind {
                for offset in vertices.iter_mut() {
                    *offset = rotate(*offset, [0.0, 0.0], degrees);
                }
            }
        }
    }

    /// Move one brush vertex. Returns false if the handle is stale.
    pub fn move_vertex(&mut self, handle: VertexHandle, delta: [f32; 2]) -> bool {
        let Some(object) = self.object_mut(handle.object) else {
            return false;
        };
        match &mut object.kind {
            ObjectKind::Brush { vertices } => match vertices.get_mut(handle.index) {
                Some(offset) => {
                    *offset = add(*offset, delta);
                    true
                }
                None => false,
            },
            ObjectKind::Entity { .. } => false,
        }
    }

    /// Copies of the selected objects, for restoring after a cancelled edit.
    pub fn snapshot_selection(&self) -> Vec<MapObject> {
        self.selected_objects().cloned().collect()
    }

    /// Put back objects taken with `snapshot_selection`.
    pub fn restore(&mut self, snapshot: Vec<MapObject>) {
        for saved in snapshot {
            if let Some(object) = self.object_mut(saved.id) {
                *object = saved;
            }
        }
    }
}

pub(crate) fn add(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] + b[0], a[1] + b[1]]
}

pub(crate) fn sub(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

pub(crate) fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let d = sub(a, b);
    (d[0] * d[0] + d[1] * d[1]).sqrt()
}

fn rotate(point: [f32; 2], center: [f32; 2], degrees: f32) -> [f32; 2] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let [x, y] = sub(point, center);
    add(center, [x * cos - y * sin, x * sin + y * cos])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SelectionMode;

    fn square() -> Vec<[f32; 2]> {
        vec![[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]]
    }

    fn assert_near(actual: [f32; 2], expected: [f32; 2]) {
        assert!(
            distance(actual, expected) < 1e-4,
            "{:?} is not near {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_object_at_picks_nearest() {
        let mut doc = MapDocument::new();
        let far = doc.add_entity("light", [3.0, 0.0]);
        let near = doc.add_brush([1.0, 0.0], square());

        assert_eq!(doc.object_at([0.0, 0.0], 4.0), Some(near));
        assert_eq!(doc.object_at([4.0, 0.0], 2.0), Some(far));
        assert_eq!(doc.object_at([10.0, 10.0], 2.0), None);
    }

    #[test]
    fn test_translate_moves_only_selection() {
        let mut doc = MapDocument::new();
        let a = doc.add_entity("light", [0.0, 0.0]);
        let b = doc.add_entity("light", [5.0, 0.0]);
        doc.selection_mut().select(a, SelectionMode::Replace);

        doc.translate_selection([1.0, 2.0]);

        assert_eq!(doc.object(a).map(|o| o.position), Some([1.0, 2.0]));
        assert_eq!(doc.object(b).map(|o| o.position), Some([5.0, 0.0]));
    }

    #[test]
    fn test_rotate_turns_brush_vertices() {
        let mut doc = MapDocument::new();
        let brush = doc.add_brush([2.0, 0.0], square());
        doc.selection_mut().select(brush, SelectionMode::Replace);

        doc.rotate_selection([0.0, 0.0], 90.0);

        let object = doc.object(brush).cloned().unwrap();
        assert_near(object.position, [0.0, 2.0]);
        assert_near(object.vertex(0).unwrap(), [1.0, 1.0]);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut doc = MapDocument::new();
        let brush = doc.add_brush([0.0, 0.0], square());
        doc.selection_mut().select(brush, SelectionMode::Replace);
        let snapshot = doc.snapshot_selection();

        doc.translate_selection([4.0, 4.0]);
        assert!(doc.move_vertex(VertexHandle::new(brush, 2), [1.0, 0.0]));
        doc.restore(snapshot);

        let object = doc.object(brush).unwrap();
        assert_eq!(object.position, [0.0, 0.0]);
        assert_eq!(object.vertex(2), Some([1.0, 1.0]));
    }

    #[test]
    fn test_remove_drops_selection() {
        let mut doc = MapDocument::new();
        let id = doc.add_entity("info_player_start", [0.0, 0.0]);
        doc.selection_mut().select(id, SelectionMode::Replace);

        let removed = doc.remove(id).unwrap();

        assert_eq!(removed.classname(), Some("info_player_start"));
        assert!(doc.selection().is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_vertex_handle_hit_target() {
        let handle = VertexHandle::new(ObjectId(7), 3);
        assert_eq!(VertexHandle::from_hit_target(handle.to_hit_target()), handle);
    }

    #[test]
    fn test_selection_center() {
        let mut doc = MapDocument::new();
        assert_eq!(doc.selection_center(), None);

        let a = doc.add_entity("light", [0.0, 0.0]);
        let b = doc.add_entity("light", [4.0, 2.0]);
        doc.selection_mut().select(a, SelectionMode::Replace);
        doc.selection_mut().select(b, SelectionMode::Toggle);

        assert_eq!(doc.selection_center(), Some([2.0, 1.0]));
    }
}
