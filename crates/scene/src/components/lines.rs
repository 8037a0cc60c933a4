use foundation::handles::Handle;
use foundation::math::Vec3;

use crate::components::Color;

/// Two endpoints in the owning entity's local space.
pub type Segment = [Vec3; 2];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LineSetId(pub Handle);

/// Unindexed line-segment list, the renderable form of a wireframe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    pub segments: Vec<Segment>,
}

impl LineSet {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinePart {
    pub set: LineSetId,
    pub color: Color,
}

/// Several line sets drawn under one shared transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineGroup {
    pub parts: Vec<LinePart>,
}

impl LineGroup {
    pub fn new(parts: Vec<LinePart>) -> Self {
        Self { parts }
    }
}
