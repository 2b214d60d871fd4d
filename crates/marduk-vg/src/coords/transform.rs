use super::Vec2;

/// 2×3 affine transform stored as `[a, b, c, d, e, f]`.
///
/// Maps a point with:
/// - `x' = a·x + c·y + e`
/// - `y' = b·x + d·y + f`
///
/// `Copy`: context states snapshot transforms by value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(pub [f32; 6]);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Rotation by `angle` radians (clockwise on a +Y-down screen).
    #[inline]
    pub fn rotate(angle: f32) -> Self {
        let (sn, cs) = angle.sin_cos();
        Self([cs, sn, -sn, cs, 0.0, 0.0])
    }

    #[inline]
    pub fn skew_x(angle: f32) -> Self {
        Self([1.0, 0.0, angle.tan(), 1.0, 0.0, 0.0])
    }

    #[inline]
    pub fn skew_y(angle: f32) -> Self {
        Self([1.0, angle.tan(), 0.0, 1.0, 0.0, 0.0])
    }

    /// Composition that applies `self` first, then `next`.
    #[must_use]
    pub fn then(self, next: Transform) -> Transform {
        let t = self.0;
        let s = next.0;
        Transform([
            t[0] * s[0] + t[1] * s[2],
            t[0] * s[1] + t[1] * s[3],
            t[2] * s[0] + t[3] * s[2],
            t[2] * s[1] + t[3] * s[3],
            t[4] * s[0] + t[5] * s[2] + s[4],
            t[4] * s[1] + t[5] * s[3] + s[5],
        ])
    }

    /// Composition that applies `first`, then `self`.
    #[inline]
    #[must_use]
    pub fn pre_multiply(self, first: Transform) -> Transform {
        first.then(self)
    }

    /// Inverse, or `None` when the determinant is within `1e-6` of zero.
    pub fn try_inverse(self) -> Option<Transform> {
        let t = self.0;
        let det = t[0] as f64 * t[3] as f64 - t[2] as f64 * t[1] as f64;
        if det > -1e-6 && det < 1e-6 {
            return None;
        }
        let invdet = 1.0 / det;
        Some(Transform([
            (t[3] as f64 * invdet) as f32,
            (-(t[1] as f64) * invdet) as f32,
            (-(t[2] as f64) * invdet) as f32,
            (t[0] as f64 * invdet) as f32,
            ((t[2] as f64 * t[5] as f64 - t[3] as f64 * t[4] as f64) * invdet) as f32,
            ((t[1] as f64 * t[4] as f64 - t[0] as f64 * t[5] as f64) * invdet) as f32,
        ]))
    }

    /// Inverse with identity fallback for singular matrices.
    #[inline]
    pub fn inverse(self) -> Transform {
        self.try_inverse().unwrap_or_default()
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        let t = self.0;
        Vec2::new(p.x * t[0] + p.y * t[2] + t[4], p.x * t[1] + p.y * t[3] + t[5])
    }

    /// Mean of the x and y axis scale factors; used to scale stroke widths.
    pub fn average_scale(self) -> f32 {
        let t = self.0;
        let sx = (t[0] * t[0] + t[2] * t[2]).sqrt();
        let sy = (t[1] * t[1] + t[3] * t[3]).sqrt();
        (sx + sy) * 0.5
    }

    /// Column-major 3×4 layout (each column padded to a vec4) for uniform upload.
    pub fn to_mat3x4(self) -> [f32; 12] {
        let t = self.0;
        [
            t[0], t[1], 0.0, 0.0, //
            t[2], t[3], 0.0, 0.0, //
            t[4], t[5], 1.0, 0.0,
        ]
    }
}

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg.to_radians()
}

#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn then_applies_left_operand_first() {
        let t = Transform::scale(2.0, 2.0).then(Transform::translate(10.0, 0.0));
        assert!(close(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0)));

        let u = Transform::translate(10.0, 0.0).then(Transform::scale(2.0, 2.0));
        assert!(close(u.apply(Vec2::new(1.0, 1.0)), Vec2::new(22.0, 2.0)));
    }

    #[test]
    fn pre_multiply_is_reversed_then() {
        let a = Transform::rotate(0.3);
        let b = Transform::translate(4.0, -2.0);
        assert_eq!(a.pre_multiply(b), b.then(a));
    }

    #[test]
    fn rotate_quarter_turn_maps_x_to_y() {
        let p = Transform::rotate(FRAC_PI_2).apply(Vec2::new(1.0, 0.0));
        assert!(close(p, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform::rotate(0.7)
            .then(Transform::scale(3.0, 0.5))
            .then(Transform::translate(-20.0, 13.0));
        let p = Vec2::new(5.0, -7.0);
        assert!(close(t.inverse().apply(t.apply(p)), p));
    }

    #[test]
    fn singular_inverse_falls_back_to_identity() {
        let t = Transform::scale(0.0, 5.0);
        assert!(t.try_inverse().is_none());
        assert_eq!(t.inverse(), Transform::identity());
    }

    #[test]
    fn average_scale_of_uniform_scale() {
        let t = Transform::rotate(1.1).then(Transform::scale(3.0, 3.0));
        assert!((t.average_scale() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn mat3x4_places_translation_in_third_column() {
        let m = Transform::translate(7.0, 9.0).to_mat3x4();
        assert_eq!(&m[8..], &[7.0, 9.0, 1.0, 0.0]);
    }
}
