use core::f32::consts::PI;

use crate::buffer::GrowBuffer;
use crate::coords::Vec2;
use crate::render::{Vertex, VertexRange};

use super::cache::PathCache;
use super::joins::{bevel_join, choose_bevel, push_vertex};
use super::point::{Point, PointFlags};
use super::{LineCap, LineJoin};

/// Number of segments needed to approximate an arc of radius `r` spanning
/// `arc` radians within tolerance `tol`. Never below two.
pub fn curve_divs(r: f32, arc: f32, tol: f32) -> usize {
    let da = (r / (r + tol)).acos() * 2.0;
    ((arc / da).ceil() as usize).max(2)
}

/// Steps of a round join turning through `delta_angle` radians, given the
/// cap division count `ncap`.
pub fn round_join_steps(delta_angle: f32, ncap: usize) -> usize {
    let steps = (delta_angle / PI * ncap as f32).ceil() as usize;
    steps.clamp(2, ncap.max(2))
}

/// Texture coordinates across a stroke.
#[derive(Debug, Copy, Clone)]
struct StripUv {
    u0: f32,
    u1: f32,
}

fn butt_cap_start(out: &mut GrowBuffer<Vertex>, p: Vec2, d: Vec2, w: f32, dist: f32, aa: f32, uv: StripUv) {
    let p = p - d * dist;
    let dl = d.perp();
    push_vertex(out, p + dl * w - d * aa, uv.u0, 0.0);
    push_vertex(out, p - dl * w - d * aa, uv.u1, 0.0);
    push_vertex(out, p + dl * w, uv.u0, 1.0);
    push_vertex(out, p - dl * w, uv.u1, 1.0);
}

fn butt_cap_end(out: &mut GrowBuffer<Vertex>, p: Vec2, d: Vec2, w: f32, dist: f32, aa: f32, uv: StripUv) {
    let p = p + d * dist;
    let dl = d.perp();
    push_vertex(out, p + dl * w, uv.u0, 1.0);
    push_vertex(out, p - dl * w, uv.u1, 1.0);
    push_vertex(out, p + dl * w + d * aa, uv.u0, 0.0);
    push_vertex(out, p - dl * w + d * aa, uv.u1, 0.0);
}

fn round_cap_start(out: &mut GrowBuffer<Vertex>, p: Vec2, d: Vec2, w: f32, ncap: usize, uv: StripUv) {
    let dl = d.perp();
    for i in 0..ncap {
        let a = i as f32 / (ncap - 1) as f32 * PI;
        let (s, c) = a.sin_cos();
        push_vertex(out, p - dl * (c * w) - d * (s * w), uv.u0, 1.0);
        push_vertex(out, p, 0.5, 1.0);
    }
    push_vertex(out, p + dl * w, uv.u0, 1.0);
    push_vertex(out, p - dl * w, uv.u1, 1.0);
}

fn round_cap_end(out: &mut GrowBuffer<Vertex>, p: Vec2, d: Vec2, w: f32, ncap: usize, uv: StripUv) {
    let dl = d.perp();
    push_vertex(out, p + dl * w, uv.u0, 1.0);
    push_vertex(out, p - dl * w, uv.u1, 1.0);
    for i in 0..ncap {
        let a = i as f32 / (ncap - 1) as f32 * PI;
        let (s, c) = a.sin_cos();
        push_vertex(out, p, 0.5, 1.0);
        push_vertex(out, p - dl * (c * w) + d * (s * w), uv.u0, 1.0);
    }
}

/// Round join as an arc fan on the outer side of the turn.
fn round_join(out: &mut GrowBuffer<Vertex>, p0: &Point, p1: &Point, w: f32, ncap: usize, uv: StripUv) {
    let dl0 = p0.d.perp();
    let dl1 = p1.d.perp();
    let p = p1.pos;
    let inner = p1.flags.contains(PointFlags::INNER_BEVEL);

    if p1.flags.contains(PointFlags::LEFT) {
        let (l0, l1) = choose_bevel(inner, p0, p1, w);
        let a0 = (-dl0.y).atan2(-dl0.x);
        let mut a1 = (-dl1.y).atan2(-dl1.x);
        if a1 > a0 {
            a1 -= PI * 2.0;
        }

        push_vertex(out, l0, uv.u0, 1.0);
        push_vertex(out, p - dl0 * w, uv.u1, 1.0);

        let n = round_join_steps(a0 - a1, ncap);
        for i in 0..n {
            let t = i as f32 / (n - 1) as f32;
            let (s, c) = (a0 + t * (a1 - a0)).sin_cos();
            push_vertex(out, p, 0.5, 1.0);
            push_vertex(out, p + Vec2::new(c, s) * w, uv.u1, 1.0);
        }

        push_vertex(out, l1, uv.u0, 1.0);
        push_vertex(out, p - dl1 * w, uv.u1, 1.0);
    } else {
        let (r0, r1) = choose_bevel(inner, p0, p1, -w);
        let a0 = dl0.y.atan2(dl0.x);
        let mut a1 = dl1.y.atan2(dl1.x);
        if a1 < a0 {
            a1 += PI * 2.0;
        }

        push_vertex(out, p + dl0 * w, uv.u0, 1.0);
        push_vertex(out, r0, uv.u1, 1.0);

        let n = round_join_steps(a1 - a0, ncap);
        for i in 0..n {
            let t = i as f32 / (n - 1) as f32;
            let (s, c) = (a0 + t * (a1 - a0)).sin_cos();
            push_vertex(out, p + Vec2::new(c, s) * w, uv.u0, 1.0);
            push_vertex(out, p, 0.5, 1.0);
        }

        push_vertex(out, p + dl1 * w, uv.u0, 1.0);
        push_vertex(out, r1, uv.u1, 1.0);
    }
}

/// Stroke styling handed to [`PathCache::expand_stroke`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeStyle {
    /// Half of the stroke width.
    pub half_width: f32,
    /// Anti-aliasing fringe; zero disables it.
    pub fringe: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
    pub tess_tol: f32,
}

impl PathCache {
    /// Builds one triangle strip per path into `Path::stroke`.
    ///
    /// Open paths get caps at both ends; closed paths wrap around by
    /// repeating their first vertex pair. Paths with fewer than two points
    /// produce an empty range.
    pub fn expand_stroke(&mut self, style: StrokeStyle) {
        let aa = style.fringe;
        let ncap = curve_divs(style.half_width, PI, style.tess_tol);
        let w = style.half_width + aa * 0.5;
        let uv = if aa == 0.0 {
            StripUv { u0: 0.5, u1: 0.5 }
        } else {
            StripUv { u0: 0.0, u1: 1.0 }
        };

        self.calculate_joins(w, style.join, style.miter_limit);
        self.verts.clear();

        let out = &mut self.verts;
        for path in self.paths.as_mut_slice() {
            let pts = &self.points[path.points()];
            let count = pts.len();
            path.fill = VertexRange::new(out.len(), 0);
            if count < 2 {
                path.stroke = VertexRange::new(out.len(), 0);
                continue;
            }

            let start = out.len();
            let (first, range) = if path.closed { (count - 1, 0..count) } else { (0, 1..count - 1) };

            if !path.closed {
                let mut d = pts[1].pos - pts[0].pos;
                d.normalize();
                match style.cap {
                    LineCap::Butt => butt_cap_start(out, pts[0].pos, d, w, 0.0, aa, uv),
                    LineCap::Square => butt_cap_start(out, pts[0].pos, d, w, w - aa, aa, uv),
                    LineCap::Round => round_cap_start(out, pts[0].pos, d, w, ncap, uv),
                }
            }

            let mut p0 = &pts[first];
            for j in range {
                let p1 = &pts[j];
                if p1.is_bevel() {
                    if style.join == LineJoin::Round {
                        round_join(out, p0, p1, w, ncap, uv);
                    } else {
                        bevel_join(out, p0, p1, w, w, uv.u0, uv.u1);
                    }
                } else {
                    push_vertex(out, p1.pos + p1.dm * w, uv.u0, 1.0);
                    push_vertex(out, p1.pos - p1.dm * w, uv.u1, 1.0);
                }
                p0 = p1;
            }

            if path.closed {
                let a = out[start];
                let b = out[start + 1];
                out.push(a.with_uv(uv.u0, 1.0));
                out.push(b.with_uv(uv.u1, 1.0));
            } else {
                let end = pts[count - 1].pos;
                let mut d = end - p0.pos;
                d.normalize();
                match style.cap {
                    LineCap::Butt => butt_cap_end(out, end, d, w, 0.0, aa, uv),
                    LineCap::Square => butt_cap_end(out, end, d, w, w - aa, aa, uv),
                    LineCap::Round => round_cap_end(out, end, d, w, ncap, uv),
                }
            }

            path.stroke = VertexRange::new(start, out.len() - start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Transform;
    use crate::path::{CommandList, PathRecorder};

    fn style(half_width: f32, cap: LineCap, join: LineJoin) -> StrokeStyle {
        StrokeStyle {
            half_width,
            fringe: 1.0,
            cap,
            join,
            miter_limit: 10.0,
            tess_tol: 0.25,
        }
    }

    fn stroked(style: StrokeStyle, f: impl FnOnce(&mut PathRecorder<'_>)) -> PathCache {
        let mut list = CommandList::new();
        f(&mut list.record(Transform::identity(), 0.01));
        let mut cache = PathCache::new();
        cache.flatten(list.commands(), 0.25, 0.01);
        cache.expand_stroke(style);
        cache
    }

    fn strip(cache: &PathCache) -> &[Vertex] {
        &cache.vertices()[cache.paths()[0].stroke.as_range()]
    }

    // ── divisions ─────────────────────────────────────────────────────────

    #[test]
    fn curve_divs_matches_formula() {
        let r: f32 = 10.0;
        let tol = 0.25;
        let expected = (PI / ((r / (r + tol)).acos() * 2.0)).ceil() as usize;
        assert_eq!(curve_divs(r, PI, tol), expected);
        assert_eq!(curve_divs(r, PI, tol), 8);
    }

    #[test]
    fn curve_divs_never_below_two() {
        assert_eq!(curve_divs(0.0, PI, 0.25), 2);
        assert_eq!(curve_divs(0.1, 0.01, 0.25), 2);
    }

    #[test]
    fn round_join_steps_are_clamped() {
        assert_eq!(round_join_steps(PI, 8), 8);
        assert_eq!(round_join_steps(PI / 2.0, 8), 4);
        assert_eq!(round_join_steps(0.01, 8), 2);
        assert_eq!(round_join_steps(3.0 * PI, 8), 8);
        assert_eq!(round_join_steps(-1.0, 8), 2);
    }

    // ── caps ──────────────────────────────────────────────────────────────

    #[test]
    fn butt_line_is_two_caps() {
        let cache = stroked(style(2.0, LineCap::Butt, LineJoin::Miter), |r| {
            r.move_to(0.0, 0.0);
            r.line_to(10.0, 0.0);
        });
        let strip = strip(&cache);
        assert_eq!(strip.len(), 8);
        // w = 2 + fringe/2; the butt cap sits on the end point.
        assert_eq!(strip[2], Vertex::new(0.0, -2.5, 0.0, 1.0));
        assert_eq!(strip[3], Vertex::new(0.0, 2.5, 1.0, 1.0));
        // Outer fringe pulled back by the fringe width.
        assert_eq!(strip[0], Vertex::new(-1.0, -2.5, 0.0, 0.0));
        assert_eq!(strip[4], Vertex::new(10.0, -2.5, 0.0, 1.0));
        assert_eq!(strip[6], Vertex::new(11.0, -2.5, 0.0, 0.0));
    }

    #[test]
    fn square_cap_extends_by_half_width() {
        let cache = stroked(style(2.0, LineCap::Square, LineJoin::Miter), |r| {
            r.move_to(0.0, 0.0);
            r.line_to(10.0, 0.0);
        });
        let strip = strip(&cache);
        // w - aa = 1.5 past each end.
        assert_eq!(strip[2].x, -1.5);
        assert_eq!(strip[4].x, 11.5);
    }

    #[test]
    fn round_cap_vertex_count_follows_ncap() {
        let s = style(10.0, LineCap::Round, LineJoin::Miter);
        let ncap = curve_divs(s.half_width, PI, s.tess_tol);
        let cache = stroked(s, |r| {
            r.move_to(0.0, 0.0);
            r.line_to(100.0, 0.0);
        });
        assert_eq!(strip(&cache).len(), 2 * (2 * ncap + 2));
    }

    // ── joins ─────────────────────────────────────────────────────────────

    #[test]
    fn closed_rect_wraps_first_pair() {
        let cache = stroked(style(1.0, LineCap::Butt, LineJoin::Miter), |r| {
            r.rect(0.0, 0.0, 10.0, 10.0)
        });
        let strip = strip(&cache);
        assert_eq!(strip.len(), 10);
        assert_eq!((strip[8].x, strip[8].y), (strip[0].x, strip[0].y));
        assert_eq!((strip[9].x, strip[9].y), (strip[1].x, strip[1].y));
    }

    #[test]
    fn round_join_fans_per_corner() {
        let s = style(5.0, LineCap::Butt, LineJoin::Round);
        let w = s.half_width + s.fringe * 0.5;
        let ncap = curve_divs(s.half_width, PI, s.tess_tol);
        let cache = stroked(s, |r| {
            r.move_to(0.0, 0.0);
            r.line_to(50.0, 0.0);
            r.line_to(50.0, 50.0);
        });
        let path = cache.paths()[0];
        assert_eq!(path.bevel_count, 3);
        // Quarter turn: 4 framing vertices plus the fan pairs.
        let n = round_join_steps(PI / 2.0, ncap);
        assert_eq!(strip(&cache).len(), 4 + 4 + 2 * n + 4);
        // Every vertex stays within w of the path.
        for v in strip(&cache) {
            assert!(v.x >= -w - 1.0 - 1e-3 && v.y <= 50.0 + w + 1e-3);
        }
    }

    #[test]
    fn bevel_join_emits_four_pairs_on_outer_side() {
        let cache = stroked(style(1.0, LineCap::Butt, LineJoin::Bevel), |r| {
            r.move_to(0.0, 0.0);
            r.line_to(50.0, 0.0);
            r.line_to(50.0, 50.0);
        });
        assert_eq!(strip(&cache).len(), 4 + 8 + 4);
    }

    #[test]
    fn short_paths_produce_nothing() {
        let cache = stroked(style(1.0, LineCap::Round, LineJoin::Round), |r| r.move_to(5.0, 5.0));
        assert!(cache.paths()[0].stroke.is_empty());
        assert!(cache.vertices().is_empty());
    }

    #[test]
    fn aliased_stroke_uses_centre_coords() {
        let mut s = style(1.0, LineCap::Butt, LineJoin::Miter);
        s.fringe = 0.0;
        let cache = stroked(s, |r| {
            r.move_to(0.0, 0.0);
            r.line_to(10.0, 0.0);
        });
        assert!(strip(&cache).iter().all(|v| v.u == 0.5));
    }
}
