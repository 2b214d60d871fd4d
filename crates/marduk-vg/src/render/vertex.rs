use bytemuck::{Pod, Zeroable};

/// Tessellated vertex handed to renderers.
///
/// `u` carries the anti-aliasing coverage across a stroke or fringe
/// (0 and 1 at the outer edges, 0.5 on the centerline) and `v` the coverage
/// along it (0 at the outer end of a butt cap fringe).
///
/// Layout (16 bytes): `x, y, u, v` as `f32`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

impl Vertex {
    #[inline]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { x, y, u, v }
    }

    /// Same position, new texture coordinates.
    #[inline]
    pub const fn with_uv(self, u: f32, v: f32) -> Self {
        Self { u, v, ..self }
    }
}

/// Contiguous run of vertices inside a vertex buffer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct VertexRange {
    pub offset: usize,
    pub count: usize,
}

impl VertexRange {
    #[inline]
    pub const fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn as_range(self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.count
    }
}
