use crate::buffer::GrowBuffer;
use crate::coords::Vec2;
use crate::render::Vertex;

use super::LineJoin;
use super::cache::PathCache;
use super::point::{Point, PointFlags};

/// Upper bound on the miter scale `1/|dm|²`, reached at very sharp turns.
const MAX_MITER_SCALE: f32 = 600.0;

impl PathCache {
    /// Computes miter directions and join flags for every point.
    ///
    /// `w` is the half width of the geometry being built (stroke half width,
    /// or the fringe width for fills); it bounds how far the inner side of a
    /// join may overlap before it is beveled.
    pub fn calculate_joins(&mut self, w: f32, join: LineJoin, miter_limit: f32) {
        let iw = if w > 0.0 { 1.0 / w } else { 0.0 };

        for path in self.paths.as_mut_slice() {
            let pts = &mut self.points.as_mut_slice()[path.points()];
            let count = pts.len();
            let mut nleft = 0;
            path.bevel_count = 0;

            for i in 0..count {
                let p0 = pts[(i + count - 1) % count];
                let p1 = &mut pts[i];

                let dl0 = p0.d.perp();
                let dl1 = p1.d.perp();
                p1.dm = (dl0 + dl1) * 0.5;
                let dmr2 = p1.dm.length_squared();
                if dmr2 > 1e-6 {
                    p1.dm = p1.dm * (1.0 / dmr2).min(MAX_MITER_SCALE);
                }

                p1.flags &= PointFlags::CORNER;

                if p1.d.cross(p0.d) > 0.0 {
                    nleft += 1;
                    p1.flags |= PointFlags::LEFT;
                }

                let limit = (p0.len.min(p1.len) * iw).max(1.01);
                if dmr2 * limit * limit < 1.0 {
                    p1.flags |= PointFlags::INNER_BEVEL;
                }

                if p1.flags.contains(PointFlags::CORNER)
                    && (dmr2 * miter_limit * miter_limit < 1.0 || join != LineJoin::Miter)
                {
                    p1.flags |= PointFlags::BEVEL;
                }

                if p1.is_bevel() {
                    path.bevel_count += 1;
                }
            }

            path.convex = count > 0 && nleft == count;
        }
    }
}

#[inline]
pub(super) fn push_vertex(out: &mut GrowBuffer<Vertex>, p: Vec2, u: f32, v: f32) {
    out.push(Vertex::new(p.x, p.y, u, v));
}

/// Offset points on both sides of the join at `p1`, at distance `w` along
/// the incoming and outgoing normals (inner bevel) or both on the miter.
pub(super) fn choose_bevel(inner_bevel: bool, p0: &Point, p1: &Point, w: f32) -> (Vec2, Vec2) {
    if inner_bevel {
        (p1.pos + p0.d.perp() * w, p1.pos + p1.d.perp() * w)
    } else {
        let m = p1.pos + p1.dm * w;
        (m, m)
    }
}

/// Emits a beveled join as strip pairs: left offset `lw` (texcoord `lu`)
/// and right offset `rw` (texcoord `ru`).
pub(super) fn bevel_join(
    out: &mut GrowBuffer<Vertex>,
    p0: &Point,
    p1: &Point,
    lw: f32,
    rw: f32,
    lu: f32,
    ru: f32,
) {
    let dl0 = p0.d.perp();
    let dl1 = p1.d.perp();
    let p = p1.pos;
    let inner = p1.flags.contains(PointFlags::INNER_BEVEL);
    let outer = p1.flags.contains(PointFlags::BEVEL);

    if p1.flags.contains(PointFlags::LEFT) {
        let (l0, l1) = choose_bevel(inner, p0, p1, lw);

        push_vertex(out, l0, lu, 1.0);
        push_vertex(out, p - dl0 * rw, ru, 1.0);

        if outer {
            push_vertex(out, l0, lu, 1.0);
            push_vertex(out, p - dl0 * rw, ru, 1.0);

            push_vertex(out, l1, lu, 1.0);
            push_vertex(out, p - dl1 * rw, ru, 1.0);
        } else {
            let r0 = p - p1.dm * rw;

            push_vertex(out, p, 0.5, 1.0);
            push_vertex(out, p - dl0 * rw, ru, 1.0);

            push_vertex(out, r0, ru, 1.0);
            push_vertex(out, r0, ru, 1.0);

            push_vertex(out, p, 0.5, 1.0);
            push_vertex(out, p - dl1 * rw, ru, 1.0);
        }

        push_vertex(out, l1, lu, 1.0);
        push_vertex(out, p - dl1 * rw, ru, 1.0);
    } else {
        let (r0, r1) = choose_bevel(inner, p0, p1, -rw);

        push_vertex(out, p + dl0 * lw, lu, 1.0);
        push_vertex(out, r0, ru, 1.0);

        if outer {
            push_vertex(out, p + dl0 * lw, lu, 1.0);
            push_vertex(out, r0, ru, 1.0);

            push_vertex(out, p + dl1 * lw, lu, 1.0);
            push_vertex(out, r1, ru, 1.0);
        } else {
            let l0 = p + p1.dm * lw;

            push_vertex(out, p + dl0 * lw, lu, 1.0);
            push_vertex(out, p, 0.5, 1.0);

            push_vertex(out, l0, lu, 1.0);
            push_vertex(out, l0, lu, 1.0);

            push_vertex(out, p + dl1 * lw, lu, 1.0);
            push_vertex(out, p, 0.5, 1.0);
        }

        push_vertex(out, p + dl1 * lw, lu, 1.0);
        push_vertex(out, r1, ru, 1.0);
    }
}
