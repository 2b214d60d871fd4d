use super::Vec2;

/// Axis-aligned rectangle (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Overlap of two rectangles with the extent clamped to zero.
    ///
    /// Disjoint inputs collapse to a zero-sized rectangle anchored at the
    /// larger of the two minimums.
    #[inline]
    pub fn clamped_intersection(self, other: Rect) -> Rect {
        let min_x = self.origin.x.max(other.origin.x);
        let min_y = self.origin.y.max(other.origin.y);
        let max_x = (self.origin.x + self.size.x).min(other.origin.x + other.size.x);
        let max_y = (self.origin.y + self.size.y).min(other.origin.y + other.size.y);

        Rect::new(min_x, min_y, (max_x - min_x).max(0.0), (max_y - min_y).max(0.0))
    }
}
