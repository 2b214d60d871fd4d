use core::f32::consts::{FRAC_PI_2, PI};

use crate::coords::{CornerRadii, Vec2};

use super::Winding;
use super::command::PathRecorder;

/// Control-point distance for approximating a quarter circle with a cubic.
pub const KAPPA90: f32 = 0.552_284_8;

/// Radii below this collapse a rounded rectangle to a plain one.
const MIN_CORNER_RADIUS: f32 = 0.1;

/// Squared distance from `p` to the segment `a`–`b`.
fn dist_pt_seg_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let pq = b - a;
    let d = pq.length_squared();
    let mut t = pq.dot(p - a);
    if d > 0.0 {
        t /= d;
    }
    let t = t.clamp(0.0, 1.0);
    (a + pq * t - p).length_squared()
}

impl PathRecorder<'_> {
    /// Circular arc around `(cx, cy)` from angle `a0` to `a1` (radians).
    ///
    /// Connects to the current path with a line, or starts a new one when the
    /// path is empty. Emits one cubic per quarter turn (at most five).
    pub fn arc(&mut self, cx: f32, cy: f32, r: f32, a0: f32, a1: f32, dir: Winding) {
        let mut da = a1 - a0;
        match dir {
            Winding::Cw => {
                if da.abs() >= PI * 2.0 {
                    da = PI * 2.0;
                } else {
                    while da < 0.0 {
                        da += PI * 2.0;
                    }
                }
            }
            Winding::Ccw => {
                if da.abs() >= PI * 2.0 {
                    da = -PI * 2.0;
                } else {
                    while da > 0.0 {
                        da -= PI * 2.0;
                    }
                }
            }
        }

        let start = Vec2::new(cx + a0.cos() * r, cy + a0.sin() * r);
        if self.has_commands() {
            self.line_to(start.x, start.y);
        } else {
            self.move_to(start.x, start.y);
        }
        // Equal angles sweep nothing.
        if da == 0.0 {
            return;
        }

        let ndivs = ((da.abs() / FRAC_PI_2 + 0.5) as i32).clamp(1, 5);
        let hda = (da / ndivs as f32) / 2.0;
        let mut kappa = (4.0 / 3.0 * (1.0 - hda.cos()) / hda.sin()).abs();
        if dir == Winding::Ccw {
            kappa = -kappa;
        }

        let tangent = |a: f32| Vec2::new(-a.sin() * r * kappa, a.cos() * r * kappa);
        let mut prev = start;
        let mut prev_tan = tangent(a0);
        for i in 1..=ndivs {
            let a = a0 + da * (i as f32 / ndivs as f32);
            let (dy, dx) = a.sin_cos();
            let p = Vec2::new(cx + dx * r, cy + dy * r);
            let tan = tangent(a);
            self.bezier_to(
                prev.x + prev_tan.x,
                prev.y + prev_tan.y,
                p.x - tan.x,
                p.y - tan.y,
                p.x,
                p.y,
            );
            prev = p;
            prev_tan = tan;
        }
    }

    /// Arc of radius `radius` tangent to the lines (last point → `(x1, y1)`)
    /// and (`(x1, y1)` → `(x2, y2)`).
    ///
    /// Degenerate configurations (coincident or collinear points, tiny
    /// radius, near-parallel tangents) fall back to a straight line to
    /// `(x1, y1)`. Does nothing on an empty path.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        if !self.has_commands() {
            return;
        }

        let tol = self.dist_tol;
        let p0 = self.last_point();
        let p1 = Vec2::new(x1, y1);
        let p2 = Vec2::new(x2, y2);

        if p0.approx_eq(p1, tol)
            || p1.approx_eq(p2, tol)
            || dist_pt_seg_sq(p1, p0, p2) < tol * tol
            || radius < tol
        {
            self.line_to(x1, y1);
            return;
        }

        let mut d0 = p0 - p1;
        let mut d1 = p2 - p1;
        d0.normalize();
        d1.normalize();
        let a = d0.dot(d1).clamp(-1.0, 1.0).acos();
        let d = radius / (a / 2.0).tan();

        if d > 10000.0 {
            self.line_to(x1, y1);
            return;
        }

        let (center, a0, a1, dir) = if d0.cross(d1) < 0.0 {
            (
                Vec2::new(x1 + d0.x * d + d0.y * radius, y1 + d0.y * d - d0.x * radius),
                d0.x.atan2(-d0.y),
                (-d1.x).atan2(d1.y),
                Winding::Cw,
            )
        } else {
            (
                Vec2::new(x1 + d0.x * d - d0.y * radius, y1 + d0.y * d + d0.x * radius),
                (-d0.x).atan2(d0.y),
                d1.x.atan2(-d1.y),
                Winding::Ccw,
            )
        };

        self.arc(center.x, center.y, radius, a0, a1, dir);
    }

    /// Closed axis-aligned rectangle.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.move_to(x, y);
        self.line_to(x, y + h);
        self.line_to(x + w, y + h);
        self.line_to(x + w, y);
        self.close();
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        self.rounded_rect_varying(x, y, w, h, CornerRadii::all(r));
    }

    /// Rounded rectangle with per-corner radii.
    ///
    /// Each radius is clamped to half the extent on its axis and follows the
    /// sign of `w`/`h`, so negative sizes mirror correctly.
    pub fn rounded_rect_varying(&mut self, x: f32, y: f32, w: f32, h: f32, radii: CornerRadii) {
        if radii.all_below(MIN_CORNER_RADIUS) {
            self.rect(x, y, w, h);
            return;
        }

        let halfw = w.abs() * 0.5;
        let halfh = h.abs() * 0.5;
        let sw = w.signum();
        let sh = h.signum();
        let corner = |r: f32| (r.min(halfw) * sw, r.min(halfh) * sh);
        let (rx_bl, ry_bl) = corner(radii.bottom_left);
        let (rx_br, ry_br) = corner(radii.bottom_right);
        let (rx_tr, ry_tr) = corner(radii.top_right);
        let (rx_tl, ry_tl) = corner(radii.top_left);
        let k = 1.0 - KAPPA90;

        self.move_to(x, y + ry_tl);
        self.line_to(x, y + h - ry_bl);
        self.bezier_to(x, y + h - ry_bl * k, x + rx_bl * k, y + h, x + rx_bl, y + h);
        self.line_to(x + w - rx_br, y + h);
        self.bezier_to(x + w - rx_br * k, y + h, x + w, y + h - ry_br * k, x + w, y + h - ry_br);
        self.line_to(x + w, y + ry_tr);
        self.bezier_to(x + w, y + ry_tr * k, x + w - rx_tr * k, y, x + w - rx_tr, y);
        self.line_to(x + rx_tl, y);
        self.bezier_to(x + rx_tl * k, y, x, y + ry_tl * k, x, y + ry_tl);
        self.close();
    }

    pub fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        let kx = rx * KAPPA90;
        let ky = ry * KAPPA90;
        self.move_to(cx - rx, cy);
        self.bezier_to(cx - rx, cy + ky, cx - kx, cy + ry, cx, cy + ry);
        self.bezier_to(cx + kx, cy + ry, cx + rx, cy + ky, cx + rx, cy);
        self.bezier_to(cx + rx, cy - ky, cx + kx, cy - ry, cx, cy - ry);
        self.bezier_to(cx - kx, cy - ry, cx - rx, cy - ky, cx - rx, cy);
        self.close();
    }

    #[inline]
    pub fn circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.ellipse(cx, cy, r, r);
    }
}
