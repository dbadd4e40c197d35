//! Hit collection produced by picking through a tool chain.

/// Bit mask identifying what kind of thing a hit refers to.
///
/// Each tool declares its own constants; masks combine with `|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HitType(pub u64);

impl HitType {
    /// Matches every hit type.
    pub const ANY: HitType = HitType(u64::MAX);

    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// True if this type shares at least one bit with `mask`.
    pub fn matches(&self, mask: HitType) -> bool {
        self.0 & mask.0 != 0
    }
}

impl std::ops::BitOr for HitType {
    type Output = HitType;

    fn bitor(self, rhs: Self) -> Self::Output {
        HitType(self.0 | rhs.0)
    }
}

/// A single thing under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub hit_type: HitType,
    /// Distance from the pointer; smaller is closer.
    pub distance: f32,
    /// Where the hit happened, in viewport coordinates.
    pub point: [f32; 2],
    /// Opaque reference interpreted by the tool that produced the hit.
    pub target: u64,
}

impl Hit {
    pub fn new(hit_type: HitType, distance: f32, point: [f32; 2], target: u64) -> Self {
        Self {
            hit_type,
            distance,
            point,
            target,
        }
    }
}

/// Hits ordered by ascending distance. Equal distances keep insertion order.
#[derive(Clone, Debug, Default)]
pub struct Hits {
    hits: Vec<Hit>,
}

impl Hits {
    pub fn new() -> Self {
        Self { hits: Vec::new() }
    }

    pub fn add(&mut self, hit: Hit) {
        let index = self.hits.partition_point(|h| h.distance <= hit.distance);
        self.hits.insert(index, hit);
    }

    /// Closest hit of any type.
    pub fn first(&self) -> Option<&Hit> {
        self.hits.first()
    }

    /// Closest hit matching `mask`.
    pub fn first_of(&self, mask: HitType) -> Option<&Hit> {
        self.hits.iter().find(|h| h.hit_type.matches(mask))
    }

    /// All hits matching `mask`, closest first.
    pub fn all_of(&self, mask: HitType) -> impl Iterator<Item = &Hit> + '_ {
        self.hits.iter().filter(move |h| h.hit_type.matches(mask))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hit> + '_ {
        self.hits.iter()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }
}
