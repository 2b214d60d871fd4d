use crate::coords::{Rect, Transform};

/// Rectangular clip region in its own (possibly rotated) frame.
///
/// `xform` maps the scissor's centered local space to frame space and
/// `extent` holds its half size. A negative extent means no clipping.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scissor {
    pub xform: Transform,
    pub extent: [f32; 2],
}

impl Scissor {
    #[inline]
    pub const fn disabled() -> Self {
        Self {
            xform: Transform::identity(),
            extent: [-1.0, -1.0],
        }
    }

    /// Clip to `rect` given in the local frame of `xform`. Negative sizes
    /// clamp to zero.
    pub fn from_rect(rect: Rect, xform: Transform) -> Self {
        let w = rect.size.x.max(0.0);
        let h = rect.size.y.max(0.0);
        let center = Transform::translate(rect.origin.x + w * 0.5, rect.origin.y + h * 0.5);
        Self {
            xform: center.then(xform),
            extent: [w * 0.5, h * 0.5],
        }
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.extent[0] < -0.5
    }

    /// Axis-aligned bounds of this scissor as seen from the frame `xform`
    /// maps out of.
    ///
    /// A rotated scissor yields its bounding box, so intersecting through
    /// this is conservative.
    pub fn bounds_in(&self, xform: Transform) -> Rect {
        let p = self.xform.then(xform.inverse()).0;
        let [ex, ey] = self.extent;
        let tex = ex * p[0].abs() + ey * p[2].abs();
        let tey = ex * p[1].abs() + ey * p[3].abs();
        Rect::new(p[4] - tex, p[5] - tey, tex * 2.0, tey * 2.0)
    }
}

impl Default for Scissor {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use core::f32::consts::FRAC_PI_4;

    #[test]
    fn default_is_disabled() {
        assert!(Scissor::default().is_disabled());
        assert!(!Scissor::from_rect(Rect::new(0.0, 0.0, 0.0, 0.0), Transform::identity()).is_disabled());
    }

    #[test]
    fn negative_size_clamps_to_empty() {
        let s = Scissor::from_rect(Rect::new(10.0, 10.0, -5.0, 4.0), Transform::identity());
        assert_eq!(s.extent, [0.0, 2.0]);
        assert_eq!(s.xform.apply(Vec2::zero()), Vec2::new(10.0, 12.0));
    }

    #[test]
    fn bounds_round_trip_in_same_frame() {
        let xform = Transform::translate(5.0, 7.0);
        let s = Scissor::from_rect(Rect::new(1.0, 2.0, 30.0, 40.0), xform);
        assert_eq!(s.xform.apply(Vec2::zero()), Vec2::new(21.0, 29.0));
        assert_eq!(s.bounds_in(xform), Rect::new(1.0, 2.0, 30.0, 40.0));
    }

    #[test]
    fn rotated_bounds_enclose_the_rotated_rect() {
        let s = Scissor::from_rect(Rect::new(-10.0, -10.0, 20.0, 20.0), Transform::identity());
        let b = s.bounds_in(Transform::rotate(FRAC_PI_4));
        let half = 10.0 * 2f32.sqrt();
        assert!((b.size.x - 2.0 * half).abs() < 1e-4);
        assert!((b.size.y - 2.0 * half).abs() < 1e-4);
    }
}
