use crate::buffer::GrowBuffer;
use crate::coords::Vec2;
use crate::render::Vertex;

use super::bezier::CubicBez;
use super::point::{Path, Point, PointFlags};
use super::{Command, Winding};

/// Twice the signed area of triangle `a b c`.
#[inline]
fn triarea2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c - a).cross(b - a)
}

/// Signed area of a polygon, accumulated as a fan from the first vertex.
///
/// Positive for the orientation the engine treats as counter-clockwise
/// (the default solid winding).
pub fn poly_area(points: &[Point]) -> f32 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    points
        .windows(2)
        .skip(1)
        .map(|w| triarea2(first.pos, w[0].pos, w[1].pos))
        .sum::<f32>()
        * 0.5
}

/// Flattened geometry of the current path, plus scratch vertices for the
/// most recent fill/stroke expansion.
///
/// Flattening runs once per command stream: repeated `fill`/`stroke` calls
/// on the same path reuse the points, and only the expansion is redone.
/// Recording more commands after a fill triggers a fresh flatten.
#[derive(Debug, Default)]
pub struct PathCache {
    pub(super) points: GrowBuffer<Point>,
    pub(super) paths: GrowBuffer<Path>,
    pub(super) verts: GrowBuffer<Vertex>,
    bounds: [f32; 4],
    /// Command count and tolerances of the last flatten.
    flattened: Option<(usize, f32, f32)>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates the flattened geometry.
    pub fn clear(&mut self) {
        self.points.clear();
        self.paths.clear();
        self.verts.clear();
        self.bounds = [0.0; 4];
        self.flattened = None;
    }

    #[inline]
    pub fn paths(&self) -> &[Path] {
        self.paths.as_slice()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    #[inline]
    pub fn points_of(&self, path: &Path) -> &[Point] {
        &self.points[path.points()]
    }

    /// Scratch vertices produced by the last expansion.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        self.verts.as_slice()
    }

    /// `[min_x, min_y, max_x, max_y]` of every flattened point.
    #[inline]
    pub fn bounds(&self) -> [f32; 4] {
        self.bounds
    }

    /// Converts `commands` into per-path point lists.
    ///
    /// A no-op when the same stream has already been flattened at the same
    /// tolerances.
    pub fn flatten(&mut self, commands: &[Command], tess_tol: f32, dist_tol: f32) {
        let key = (commands.len(), tess_tol, dist_tol);
        if self.flattened == Some(key) {
            return;
        }
        self.clear();

        for cmd in commands {
            match *cmd {
                Command::MoveTo(p) => {
                    self.add_path();
                    self.add_point(p, PointFlags::CORNER, dist_tol);
                }
                Command::LineTo(p) => {
                    self.add_point(p, PointFlags::CORNER, dist_tol);
                }
                Command::BezierTo(c1, c2, p) => {
                    if let Some(last) = self.current_point() {
                        let curve = CubicBez::new(last, c1, c2, p);
                        curve.flatten(tess_tol, &mut |pt, is_end| {
                            let flags = if is_end { PointFlags::CORNER } else { PointFlags::empty() };
                            self.add_point(pt, flags, dist_tol);
                        });
                    }
                }
                Command::Close => {
                    if let Some(path) = self.paths.last_mut() {
                        path.closed = true;
                    }
                }
                Command::Winding(dir) => {
                    if let Some(path) = self.paths.last_mut() {
                        path.winding = dir;
                    }
                }
            }
        }

        let mut bounds = [1e6_f32, 1e6, -1e6, -1e6];
        for path in self.paths.as_mut_slice() {
            let pts = &mut self.points.as_mut_slice()[path.points()];

            // A loop that returns to its start is closed implicitly.
            if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
                if last.pos.approx_eq(first.pos, dist_tol) {
                    path.count -= 1;
                    path.closed = true;
                }
            }
            let pts = &mut pts[..path.count];

            if pts.len() > 2 {
                let area = poly_area(pts);
                let reverse = match path.winding {
                    Winding::Ccw => area < 0.0,
                    Winding::Cw => area > 0.0,
                };
                if reverse {
                    pts.reverse();
                }
            }

            let count = pts.len();
            for i in 0..count {
                let next = pts[(i + 1) % count].pos;
                let p = &mut pts[i];
                p.d = next - p.pos;
                p.len = p.d.normalize();

                bounds[0] = bounds[0].min(p.pos.x);
                bounds[1] = bounds[1].min(p.pos.y);
                bounds[2] = bounds[2].max(p.pos.x);
                bounds[3] = bounds[3].max(p.pos.y);
            }
        }

        self.bounds = bounds;
        self.flattened = Some(key);
        log::trace!(
            "flattened {} commands into {} paths, {} points",
            commands.len(),
            self.paths.len(),
            self.points.len()
        );
    }

    fn add_path(&mut self) {
        self.paths.push(Path {
            first: self.points.len(),
            ..Path::default()
        });
    }

    /// Last point of the open path, if it has any.
    fn current_point(&self) -> Option<Vec2> {
        let path = self.paths.last()?;
        if path.count == 0 {
            return None;
        }
        self.points.last().map(|p| p.pos)
    }

    /// Appends a point to the open path, merging it into the previous one
    /// when they coincide. Points recorded before any `MoveTo` are dropped.
    fn add_point(&mut self, pos: Vec2, flags: PointFlags, dist_tol: f32) {
        let Some(path) = self.paths.last_mut() else {
            return;
        };

        if path.count > 0 {
            if let Some(last) = self.points.last_mut() {
                if last.pos.approx_eq(pos, dist_tol) {
                    last.flags |= flags;
                    return;
                }
            }
        }

        self.points.push(Point::new(pos, flags));
        path.count += 1;
    }
}
