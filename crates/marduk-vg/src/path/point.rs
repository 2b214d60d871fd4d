use bitflags::bitflags;

use crate::coords::Vec2;
use crate::render::VertexRange;

use super::Winding;

bitflags! {
    /// Per-point join classification.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct PointFlags: u8 {
        /// Recorded vertex (not a bezier interior point).
        const CORNER = 0x01;
        /// The path turns left (counter-clockwise) here.
        const LEFT = 0x02;
        /// Outer side of the join is cut flat.
        const BEVEL = 0x04;
        /// Inner side of the join overlaps too much for a miter.
        const INNER_BEVEL = 0x08;
    }
}

/// Flattened path vertex with its outgoing segment and join data.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub pos: Vec2,
    /// Unit direction to the next point.
    pub d: Vec2,
    /// Length of the segment to the next point.
    pub len: f32,
    /// Miter direction scaled so that `pos + dm * w` is the miter corner.
    pub dm: Vec2,
    pub flags: PointFlags,
}

impl Point {
    #[inline]
    pub fn new(pos: Vec2, flags: PointFlags) -> Self {
        Self { pos, flags, ..Self::default() }
    }

    #[inline]
    pub fn is_bevel(&self) -> bool {
        self.flags.intersects(PointFlags::BEVEL | PointFlags::INNER_BEVEL)
    }
}

/// One flattened sub-path.
///
/// `first`/`count` index into the cache's point buffer; `fill`/`stroke` into
/// its scratch vertex buffer once expanded.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Path {
    pub first: usize,
    pub count: usize,
    pub closed: bool,
    pub bevel_count: usize,
    pub winding: Winding,
    pub convex: bool,
    pub fill: VertexRange,
    pub stroke: VertexRange,
}

impl Path {
    #[inline]
    pub fn points(&self) -> core::ops::Range<usize> {
        self.first..self.first + self.count
    }

    /// No expanded geometry in either range.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fill.is_empty() && self.stroke.is_empty()
    }
}
