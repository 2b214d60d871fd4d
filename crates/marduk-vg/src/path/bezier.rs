use crate::coords::Vec2;

/// Recursion cap for adaptive flattening. Depth 10 means at most 1024
/// segments per curve regardless of tolerance.
pub const MAX_FLATTEN_DEPTH: u32 = 10;

/// Recursion cap for [`CubicBez::arc_length`].
const MAX_LENGTH_DEPTH: u32 = 16;

/// Cubic bezier segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBez {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBez {
    #[inline]
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Degree elevation of a quadratic (`p0`, control `c`, `p2`).
    pub fn from_quad(p0: Vec2, c: Vec2, p2: Vec2) -> Self {
        Self::new(p0, p0 + (c - p0) * (2.0 / 3.0), p2 + (c - p2) * (2.0 / 3.0), p2)
    }

    /// De Casteljau split at `t = 0.5`.
    pub fn subdivide(&self) -> (CubicBez, CubicBez) {
        let p01 = self.p0.midpoint(self.p1);
        let p12 = self.p1.midpoint(self.p2);
        let p23 = self.p2.midpoint(self.p3);
        let p012 = p01.midpoint(p12);
        let p123 = p12.midpoint(p23);
        let mid = p012.midpoint(p123);
        (
            CubicBez::new(self.p0, p01, p012, mid),
            CubicBez::new(mid, p123, p23, self.p3),
        )
    }

    /// True when both control points lie close enough to the chord.
    ///
    /// Compares `(d2 + d3)²` against `tess_tol · |p3 − p0|²`, where `d2`/`d3`
    /// are the (chord-length scaled) distances of the control points.
    #[inline]
    pub fn is_flat(&self, tess_tol: f32) -> bool {
        let d = self.p3 - self.p0;
        let d2 = (self.p1 - self.p3).cross(d).abs();
        let d3 = (self.p2 - self.p3).cross(d).abs();
        (d2 + d3) * (d2 + d3) < tess_tol * d.length_squared()
    }

    /// Adaptive flattening.
    ///
    /// Emits every polyline vertex after `p0`. The callback's flag is true
    /// only for the final point (`p3`), which callers use to mark corners.
    /// Branches deeper than [`MAX_FLATTEN_DEPTH`] are dropped.
    pub fn flatten<F>(&self, tess_tol: f32, sink: &mut F)
    where
        F: FnMut(Vec2, bool),
    {
        self.flatten_level(tess_tol, 0, true, sink);
    }

    fn flatten_level<F>(&self, tess_tol: f32, level: u32, is_end: bool, sink: &mut F)
    where
        F: FnMut(Vec2, bool),
    {
        if level > MAX_FLATTEN_DEPTH {
            return;
        }
        if self.is_flat(tess_tol) {
            sink(self.p3, is_end);
            return;
        }
        let (left, right) = self.subdivide();
        left.flatten_level(tess_tol, level + 1, false, sink);
        right.flatten_level(tess_tol, level + 1, is_end, sink);
    }

    /// Curve length to within roughly `precision` per subdivided piece.
    ///
    /// Splits until the control polygon and the chord agree, then averages
    /// the two (the chord underestimates, the polygon overestimates).
    pub fn arc_length(&self, precision: f32) -> f32 {
        self.arc_length_level(precision.max(1e-7), 0)
    }

    fn arc_length_level(&self, precision: f32, level: u32) -> f32 {
        let chord = (self.p3 - self.p0).length();
        let polygon =
            (self.p1 - self.p0).length() + (self.p2 - self.p1).length() + (self.p3 - self.p2).length();
        if polygon - chord <= precision || level >= MAX_LENGTH_DEPTH {
            return (chord + polygon) * 0.5;
        }
        let (left, right) = self.subdivide();
        left.arc_length_level(precision, level + 1) + right.arc_length_level(precision, level + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_curve() -> CubicBez {
        CubicBez::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(120.0, -40.0),
            Vec2::new(-20.0, 160.0),
            Vec2::new(100.0, 100.0),
        )
    }

    fn polyline_length(curve: &CubicBez, tess_tol: f32) -> (f32, usize) {
        let mut prev = curve.p0;
        let mut len = 0.0;
        let mut n = 0;
        curve.flatten(tess_tol, &mut |p, _| {
            len += (p - prev).length();
            prev = p;
            n += 1;
        });
        (len, n)
    }

    #[test]
    fn flatten_ends_on_curve_end_with_end_flag() {
        let curve = s_curve();
        let mut last = None;
        let mut end_flags = 0;
        curve.flatten(0.25, &mut |p, end| {
            last = Some(p);
            if end {
                end_flags += 1;
            }
        });
        assert_eq!(last, Some(curve.p3));
        assert_eq!(end_flags, 1);
    }

    #[test]
    fn straight_curve_is_single_segment() {
        let line = CubicBez::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(30.0, 0.0),
        );
        let (len, n) = polyline_length(&line, 0.25);
        assert_eq!(n, 1);
        assert_eq!(len, 30.0);
    }

    #[test]
    fn halving_tolerance_converges_monotonically() {
        let curve = s_curve();
        let reference = curve.arc_length(1e-4);

        let mut tol = 1.0;
        let mut prev_err = f32::MAX;
        let mut prev_len = 0.0;
        for _ in 0..6 {
            let (len, _) = polyline_length(&curve, tol);
            let err = reference - len;
            assert!(len + 1e-3 >= prev_len, "length shrank at tol {tol}: {len} < {prev_len}");
            assert!(err <= prev_err + 1e-3, "error grew at tol {tol}");
            assert!(err > -1e-2, "inscribed polyline longer than the curve");
            prev_err = err;
            prev_len = len;
            tol *= 0.5;
        }
        assert!(prev_err < 0.05 * reference);
    }

    #[test]
    fn arc_length_stabilizes_with_precision() {
        let curve = s_curve();
        let coarse = curve.arc_length(1e-1);
        let fine = curve.arc_length(1e-4);
        assert!((coarse - fine).abs() < 1.0);
    }

    #[test]
    fn arc_length_of_line() {
        let line = CubicBez::from_quad(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0));
        assert!((line.arc_length(1e-3) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn from_quad_keeps_midpoint() {
        let q = CubicBez::from_quad(Vec2::new(0.0, 0.0), Vec2::new(50.0, 100.0), Vec2::new(100.0, 0.0));
        // Quadratic midpoint is 0.25*p0 + 0.5*c + 0.25*p2.
        let mid = q.subdivide().0.p3;
        assert!((mid.x - 50.0).abs() < 1e-4);
        assert!((mid.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_input_terminates() {
        let nan = CubicBez::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
        );
        let mut n = 0usize;
        nan.flatten(0.25, &mut |_, _| n += 1);
        assert!(n <= 1 << (MAX_FLATTEN_DEPTH + 1));
    }
}
