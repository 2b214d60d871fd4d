use crate::coords::Transform;
use crate::render::TextureId;

use super::{Color, Paint};

/// Linear gradients extend this far past both ends, which is "infinite" for
/// any realistic viewport.
const LARGE: f32 = 1e5;

impl Paint {
    /// Linear gradient from `(sx, sy)` (inner color) to `(ex, ey)` (outer color).
    ///
    /// Encoded as a huge box whose edge sits halfway between the two points,
    /// feathered across the gradient length.
    pub fn linear_gradient(sx: f32, sy: f32, ex: f32, ey: f32, inner: Color, outer: Color) -> Self {
        let mut dx = ex - sx;
        let mut dy = ey - sy;
        let d = (dx * dx + dy * dy).sqrt();
        if d > 0.0001 {
            dx /= d;
            dy /= d;
        } else {
            dx = 0.0;
            dy = 1.0;
        }

        Self {
            xform: Transform([dy, -dx, dx, dy, sx - dx * LARGE, sy - dy * LARGE]),
            extent: [LARGE, LARGE + d * 0.5],
            radius: 0.0,
            feather: d.max(1.0),
            inner_color: inner,
            outer_color: outer,
            image: None,
        }
    }

    /// Radial gradient centered at `(cx, cy)` blending between `inr` and `outr`.
    pub fn radial_gradient(cx: f32, cy: f32, inr: f32, outr: f32, inner: Color, outer: Color) -> Self {
        let r = (inr + outr) * 0.5;
        let f = outr - inr;

        Self {
            xform: Transform::translate(cx, cy),
            extent: [r, r],
            radius: r,
            feather: f.max(1.0),
            inner_color: inner,
            outer_color: outer,
            image: None,
        }
    }

    /// Feathered rounded box, the building block for drop shadows and glows.
    #[allow(clippy::too_many_arguments)]
    pub fn box_gradient(
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        r: f32,
        f: f32,
        inner: Color,
        outer: Color,
    ) -> Self {
        Self {
            xform: Transform::translate(x + w * 0.5, y + h * 0.5),
            extent: [w * 0.5, h * 0.5],
            radius: r,
            feather: f.max(1.0),
            inner_color: inner,
            outer_color: outer,
            image: None,
        }
    }

    /// Image pattern: `(ox, oy)` is the top-left of one image tile of size
    /// `(w, h)`, rotated by `angle` radians around that corner.
    #[allow(clippy::too_many_arguments)]
    pub fn image_pattern(
        ox: f32,
        oy: f32,
        w: f32,
        h: f32,
        angle: f32,
        image: TextureId,
        alpha: f32,
    ) -> Self {
        let mut xform = Transform::rotate(angle);
        xform.0[4] = ox;
        xform.0[5] = oy;
        let tint = Color::rgba(1.0, 1.0, 1.0, alpha);

        Self {
            xform,
            extent: [w, h],
            radius: 0.0,
            feather: 0.0,
            inner_color: tint,
            outer_color: tint,
            image: Some(image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    #[test]
    fn linear_gradient_axis_maps_to_paint_y() {
        let p = Paint::linear_gradient(10.0, 0.0, 10.0, 100.0, Color::black(), Color::white());
        assert_eq!(p.feather, 100.0);
        assert_eq!(p.extent[1], LARGE + 50.0);

        // The start point sits LARGE units into paint space along +y.
        let inv = p.xform.inverse();
        let local = inv.apply(Vec2::new(10.0, 0.0));
        assert!(local.x.abs() < 1e-2);
        assert!((local.y - LARGE).abs() < 1.0);
    }

    #[test]
    fn degenerate_linear_gradient_points_down() {
        let p = Paint::linear_gradient(5.0, 5.0, 5.0, 5.0, Color::black(), Color::white());
        assert_eq!(p.feather, 1.0);
        assert_eq!(p.xform.0[..4], [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn radial_gradient_uses_mid_radius() {
        let p = Paint::radial_gradient(0.0, 0.0, 10.0, 30.0, Color::black(), Color::white());
        assert_eq!(p.radius, 20.0);
        assert_eq!(p.extent, [20.0, 20.0]);
        assert_eq!(p.feather, 20.0);
    }

    #[test]
    fn box_gradient_centers_on_rect() {
        let p = Paint::box_gradient(10.0, 20.0, 100.0, 40.0, 4.0, 0.0, Color::black(), Color::white());
        assert_eq!(p.xform.apply(Vec2::zero()), Vec2::new(60.0, 40.0));
        assert_eq!(p.extent, [50.0, 20.0]);
        assert_eq!(p.feather, 1.0);
    }

    #[test]
    fn image_pattern_tints_with_alpha() {
        let p = Paint::image_pattern(3.0, 4.0, 64.0, 32.0, 0.0, TextureId(7), 0.5);
        assert_eq!(p.image, Some(TextureId(7)));
        assert_eq!(p.inner_color.a, 0.5);
        assert_eq!(p.xform.apply(Vec2::zero()), Vec2::new(3.0, 4.0));
    }
}
