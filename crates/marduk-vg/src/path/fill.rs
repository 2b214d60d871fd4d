use crate::render::VertexRange;

use super::LineJoin;
use super::cache::PathCache;
use super::joins::{bevel_join, push_vertex};
use super::point::PointFlags;

impl PathCache {
    /// Builds fill geometry for every flattened path.
    ///
    /// Each path gets a triangle fan (`Path::fill`) and, when `w > 0`, an
    /// anti-aliasing fringe strip (`Path::stroke`). The fan is inset by half
    /// of `fringe_width` so the fringe straddles the true edge. A lone convex
    /// path only gets the outer half of the fringe.
    pub fn expand_fill(&mut self, w: f32, fringe_width: f32, join: LineJoin, miter_limit: f32) {
        let fringe = w > 0.0;
        let woff = 0.5 * fringe_width;

        self.calculate_joins(w, join, miter_limit);
        self.verts.clear();

        let convex = self.paths.len() == 1 && self.paths[0].convex;
        let out = &mut self.verts;

        for path in self.paths.as_mut_slice() {
            let pts = &self.points[path.points()];
            let count = pts.len();
            if count == 0 {
                path.fill = VertexRange::new(out.len(), 0);
                path.stroke = VertexRange::new(out.len(), 0);
                continue;
            }

            let start = out.len();
            for i in 0..count {
                let p0 = &pts[(i + count - 1) % count];
                let p1 = &pts[i];
                if !fringe {
                    push_vertex(out, p1.pos, 0.5, 1.0);
                } else if p1.flags.contains(PointFlags::BEVEL) {
                    if p1.flags.contains(PointFlags::LEFT) {
                        push_vertex(out, p1.pos + p1.dm * woff, 0.5, 1.0);
                    } else {
                        push_vertex(out, p1.pos + p0.d.perp() * woff, 0.5, 1.0);
                        push_vertex(out, p1.pos + p1.d.perp() * woff, 0.5, 1.0);
                    }
                } else {
                    push_vertex(out, p1.pos + p1.dm * woff, 0.5, 1.0);
                }
            }
            path.fill = VertexRange::new(start, out.len() - start);

            if !fringe {
                path.stroke = VertexRange::new(out.len(), 0);
                continue;
            }

            let (lw, lu) = if convex { (woff, 0.5) } else { (w + woff, 0.0) };
            let rw = w - woff;
            let ru = 1.0;

            let start = out.len();
            for i in 0..count {
                let p0 = &pts[(i + count - 1) % count];
                let p1 = &pts[i];
                if p1.is_bevel() {
                    bevel_join(out, p0, p1, lw, rw, lu, ru);
                } else {
                    push_vertex(out, p1.pos + p1.dm * lw, lu, 1.0);
                    push_vertex(out, p1.pos - p1.dm * rw, ru, 1.0);
                }
            }

            // Close the ring.
            let first = out[start];
            let second = out[start + 1];
            out.push(first.with_uv(lu, 1.0));
            out.push(second.with_uv(ru, 1.0));

            path.stroke = VertexRange::new(start, out.len() - start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Transform, Vec2};
    use crate::path::{CommandList, PathRecorder};
    use crate::render::Vertex;

    const FRINGE: f32 = 1.0;

    fn filled(w: f32, f: impl FnOnce(&mut PathRecorder<'_>)) -> PathCache {
        let mut list = CommandList::new();
        f(&mut list.record(Transform::identity(), 0.01));
        let mut cache = PathCache::new();
        cache.flatten(list.commands(), 0.25, 0.01);
        cache.expand_fill(w, FRINGE, LineJoin::Miter, 2.4);
        cache
    }

    fn fan<'a>(cache: &'a PathCache, i: usize) -> &'a [Vertex] {
        &cache.vertices()[cache.paths()[i].fill.as_range()]
    }

    fn ring<'a>(cache: &'a PathCache, i: usize) -> &'a [Vertex] {
        &cache.vertices()[cache.paths()[i].stroke.as_range()]
    }

    #[test]
    fn aliased_fill_is_raw_polygon() {
        let cache = filled(0.0, |r| r.rect(0.0, 0.0, 10.0, 10.0));
        let fan = fan(&cache, 0);
        assert_eq!(fan.len(), 4);
        assert_eq!(fan[0], Vertex::new(0.0, 0.0, 0.5, 1.0));
        assert_eq!(fan[2], Vertex::new(10.0, 10.0, 0.5, 1.0));
        assert!(cache.paths()[0].stroke.is_empty());
    }

    #[test]
    fn antialiased_fan_is_inset_by_half_fringe() {
        let cache = filled(FRINGE, |r| r.rect(0.0, 0.0, 10.0, 10.0));
        let fan = fan(&cache, 0);
        assert_eq!(fan.len(), 4);
        assert!(Vec2::new(fan[0].x, fan[0].y).approx_eq(Vec2::new(0.5, 0.5), 1e-5));
        assert!(Vec2::new(fan[2].x, fan[2].y).approx_eq(Vec2::new(9.5, 9.5), 1e-5));
    }

    #[test]
    fn convex_fringe_is_half_width_and_closed() {
        let cache = filled(FRINGE, |r| r.rect(0.0, 0.0, 10.0, 10.0));
        let ring = ring(&cache, 0);
        // Two vertices per corner plus the repeated first pair.
        assert_eq!(ring.len(), 10);
        assert_eq!(ring[0].u, 0.5);
        assert_eq!(ring[1].u, 1.0);
        // Inner edge of a convex fringe coincides with the inset fan.
        assert!(Vec2::new(ring[0].x, ring[0].y).approx_eq(Vec2::new(0.5, 0.5), 1e-5));
        assert!(Vec2::new(ring[1].x, ring[1].y).approx_eq(Vec2::new(-0.5, -0.5), 1e-5));
        assert_eq!((ring[8].x, ring[8].y), (ring[0].x, ring[0].y));
        assert_eq!((ring[9].x, ring[9].y), (ring[1].x, ring[1].y));
    }

    #[test]
    fn multiple_paths_get_full_fringe() {
        let cache = filled(FRINGE, |r| {
            r.rect(0.0, 0.0, 10.0, 10.0);
            r.rect(5.0, 5.0, 10.0, 10.0);
        });
        assert_eq!(cache.paths().len(), 2);
        let ring = ring(&cache, 0);
        assert_eq!(ring[0].u, 0.0);
        assert!(Vec2::new(ring[0].x, ring[0].y).approx_eq(Vec2::new(1.5, 1.5), 1e-5));
    }

    #[test]
    fn ranges_are_disjoint_and_ordered() {
        let cache = filled(FRINGE, |r| {
            r.rect(0.0, 0.0, 10.0, 10.0);
            r.circle(50.0, 50.0, 10.0);
        });
        let mut end = 0;
        for path in cache.paths() {
            assert_eq!(path.fill.offset, end);
            assert_eq!(path.stroke.offset, path.fill.offset + path.fill.count);
            end = path.stroke.offset + path.stroke.count;
        }
        assert_eq!(end, cache.vertices().len());
    }
}
