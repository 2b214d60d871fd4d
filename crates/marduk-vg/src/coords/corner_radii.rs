/// Per-corner radii for a rounded rectangle.
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
/// Path builders clamp each radius to half the rectangle extent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// True when every corner is below `eps`, i.e. the shape is a plain rectangle.
    #[inline]
    pub fn all_below(self, eps: f32) -> bool {
        self.top_left < eps && self.top_right < eps && self.bottom_right < eps && self.bottom_left < eps
    }
}
