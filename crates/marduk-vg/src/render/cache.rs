use crate::buffer::GrowBuffer;
use crate::context::Scissor;
use crate::coords::Viewport;
use crate::paint::Paint;
use crate::path::Path;

use super::{DrawBatch, ShaderType, TextureId, UniformInfo, Vertex, VertexRange};

/// How a renderer must rasterize a call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CallKind {
    /// Stencil the fill fans, cover with the bounding quad, then draw fringes.
    #[default]
    Fill,
    /// Single convex sub-path: draw fans and fringes directly.
    ConvexFill,
    /// Triangle strips per sub-path.
    Stroke,
    /// Plain triangle list.
    Triangles,
}

/// Vertex ranges of one sub-path inside the batch vertex buffer.
///
/// `fill` is a triangle fan, `stroke` a triangle strip (the fringe ring for
/// fills).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PathRange {
    pub fill: VertexRange,
    pub stroke: VertexRange,
}

/// One batched draw instruction.
///
/// `uniforms[0]` is the shape pass (stencil for `Fill`, the only pass
/// otherwise) and `uniforms[1]` the cover/fringe pass for `Fill` and the
/// second stencil-stroke pass for `Stroke`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CallInfo {
    pub kind: CallKind,
    pub image: Option<TextureId>,
    pub uniforms: [UniformInfo; 2],
    pub first_path: usize,
    pub path_count: usize,
    /// Bounding quad for `Fill` (4-vertex strip) or the list for `Triangles`.
    pub triangles: Option<VertexRange>,
}

/// Per-frame output of the tessellator: vertices plus ordered draw calls.
///
/// Everything recorded here is a value snapshot, so later state changes on
/// the context never leak into calls already submitted.
#[derive(Debug, Default)]
pub struct RenderCache {
    vertices: GrowBuffer<Vertex>,
    paths: GrowBuffer<PathRange>,
    calls: GrowBuffer<CallInfo>,
    stencil_strokes: bool,
}

impl RenderCache {
    pub fn new(stencil_strokes: bool) -> Self {
        Self {
            stencil_strokes,
            ..Self::default()
        }
    }

    /// Drops the recorded frame; buffers are kept for reuse.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.paths.clear();
        self.calls.clear();
    }

    #[inline]
    pub fn calls(&self) -> &[CallInfo] {
        self.calls.as_slice()
    }

    #[inline]
    pub fn paths(&self) -> &[PathRange] {
        self.paths.as_slice()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        self.vertices.as_slice()
    }

    #[inline]
    pub fn paths_of(&self, call: &CallInfo) -> &[PathRange] {
        &self.paths[call.first_path..call.first_path + call.path_count]
    }

    pub fn batch(&self, viewport: Viewport) -> DrawBatch<'_> {
        DrawBatch {
            viewport,
            calls: self.calls.as_slice(),
            paths: self.paths.as_slice(),
            vertices: self.vertices.as_slice(),
        }
    }

    /// Records a fill of `paths`, whose ranges index into `scratch`.
    ///
    /// `bounds` is `[min_x, min_y, max_x, max_y]` of the flattened geometry.
    pub fn render_fill(
        &mut self,
        paint: &Paint,
        scissor: &Scissor,
        fringe: f32,
        bounds: [f32; 4],
        paths: &[Path],
        scratch: &[Vertex],
    ) {
        if paths.iter().all(Path::is_empty) {
            return;
        }

        let convex = paths.len() == 1 && paths[0].convex;
        let mut call = CallInfo {
            kind: if convex { CallKind::ConvexFill } else { CallKind::Fill },
            image: paint.image,
            ..CallInfo::default()
        };

        self.copy_paths(&mut call, paths, scratch);

        if convex {
            call.uniforms[0] = UniformInfo::from_paint(paint, scissor, fringe, fringe, -1.0);
        } else {
            let offset = self.vertices.len();
            let [min_x, min_y, max_x, max_y] = bounds;
            self.vertices.push(Vertex::new(max_x, max_y, 0.5, 1.0));
            self.vertices.push(Vertex::new(max_x, min_y, 0.5, 1.0));
            self.vertices.push(Vertex::new(min_x, max_y, 0.5, 1.0));
            self.vertices.push(Vertex::new(min_x, min_y, 0.5, 1.0));
            call.triangles = Some(VertexRange::new(offset, 4));

            call.uniforms[0] = UniformInfo::simple();
            call.uniforms[1] = UniformInfo::from_paint(paint, scissor, fringe, fringe, -1.0);
        }

        log::trace!("fill call: {:?}, {} sub-paths", call.kind, call.path_count);
        self.calls.push(call);
    }

    /// Records a stroke of `paths`, whose ranges index into `scratch`.
    pub fn render_stroke(
        &mut self,
        paint: &Paint,
        scissor: &Scissor,
        fringe: f32,
        stroke_width: f32,
        paths: &[Path],
        scratch: &[Vertex],
    ) {
        if paths.iter().all(Path::is_empty) {
            return;
        }

        let mut call = CallInfo {
            kind: CallKind::Stroke,
            image: paint.image,
            ..CallInfo::default()
        };

        self.copy_paths(&mut call, paths, scratch);

        call.uniforms[0] = UniformInfo::from_paint(paint, scissor, stroke_width, fringe, -1.0);
        if self.stencil_strokes {
            call.uniforms[1] =
                UniformInfo::from_paint(paint, scissor, stroke_width, fringe, 1.0 - 0.5 / 255.0);
        }

        log::trace!("stroke call: {} sub-paths", call.path_count);
        self.calls.push(call);
    }

    /// Records a triangle list (already in frame coordinates).
    pub fn render_triangles(
        &mut self,
        paint: &Paint,
        scissor: &Scissor,
        fringe: f32,
        vertices: &[Vertex],
    ) {
        if vertices.is_empty() {
            return;
        }

        let range = self.vertices.extend_from_slice(vertices);
        let mut uniform = UniformInfo::from_paint(paint, scissor, 1.0, fringe, -1.0);
        uniform.shader_type = ShaderType::Image as u32;

        self.calls.push(CallInfo {
            kind: CallKind::Triangles,
            image: paint.image,
            uniforms: [uniform, UniformInfo::default()],
            first_path: self.paths.len(),
            path_count: 0,
            triangles: Some(VertexRange::new(range.start, range.len())),
        });
    }

    fn copy_paths(&mut self, call: &mut CallInfo, paths: &[Path], scratch: &[Vertex]) {
        call.first_path = self.paths.len();
        call.path_count = paths.len();

        for path in paths {
            let fill = self.copy_range(path.fill, scratch);
            let stroke = self.copy_range(path.stroke, scratch);
            self.paths.push(PathRange { fill, stroke });
        }
    }

    fn copy_range(&mut self, src: VertexRange, scratch: &[Vertex]) -> VertexRange {
        if src.is_empty() {
            return VertexRange::new(self.vertices.len(), 0);
        }
        let range = self.vertices.extend_from_slice(&scratch[src.as_range()]);
        VertexRange::new(range.start, range.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn path(fill: VertexRange, stroke: VertexRange, convex: bool) -> Path {
        Path { count: 3, convex, fill, stroke, ..Path::default() }
    }

    fn scratch(n: usize) -> Vec<Vertex> {
        (0..n).map(|i| Vertex::new(i as f32, 0.0, 0.5, 1.0)).collect()
    }

    #[test]
    fn convex_fill_copies_ranges_and_skips_quad() {
        let mut cache = RenderCache::new(false);
        let verts = scratch(8);
        let paths = [path(VertexRange::new(0, 3), VertexRange::new(3, 5), true)];
        cache.render_fill(&Paint::default(), &Scissor::disabled(), 1.0, [0.0; 4], &paths, &verts);

        let call = cache.calls()[0];
        assert_eq!(call.kind, CallKind::ConvexFill);
        assert_eq!(call.triangles, None);
        assert_eq!(cache.vertices(), verts.as_slice());
        assert_eq!(
            cache.paths_of(&call),
            &[PathRange { fill: VertexRange::new(0, 3), stroke: VertexRange::new(3, 5) }]
        );
    }

    #[test]
    fn stencil_fill_appends_bounds_quad() {
        let mut cache = RenderCache::new(false);
        let verts = scratch(6);
        let paths = [
            path(VertexRange::new(0, 3), VertexRange::new(0, 0), true),
            path(VertexRange::new(3, 3), VertexRange::new(0, 0), true),
        ];
        let paint = Paint::color(Color::rgb(0.0, 1.0, 0.0));
        cache.render_fill(&paint, &Scissor::disabled(), 1.0, [1.0, 2.0, 3.0, 4.0], &paths, &verts);

        let call = cache.calls()[0];
        assert_eq!(call.kind, CallKind::Fill);
        assert_eq!(call.uniforms[0], UniformInfo::simple());
        assert_eq!(call.uniforms[1].inner_color, [0.0, 1.0, 0.0, 1.0]);

        let quad = &cache.vertices()[call.triangles.expect("bounds quad").as_range()];
        assert_eq!(quad[0], Vertex::new(3.0, 4.0, 0.5, 1.0));
        assert_eq!(quad[3], Vertex::new(1.0, 2.0, 0.5, 1.0));
        // Empty stroke ranges stay empty.
        assert!(cache.paths_of(&call).iter().all(|p| p.stroke.is_empty()));
    }

    #[test]
    fn calls_index_their_own_paths() {
        let mut cache = RenderCache::new(false);
        let verts = scratch(4);
        let one = [path(VertexRange::new(0, 4), VertexRange::new(0, 0), true)];
        cache.render_stroke(&Paint::default(), &Scissor::disabled(), 1.0, 2.0, &one, &verts);
        cache.render_stroke(&Paint::default(), &Scissor::disabled(), 1.0, 2.0, &one, &verts);

        let calls = cache.calls();
        assert_eq!(calls[0].first_path, 0);
        assert_eq!(calls[1].first_path, 1);
        assert_eq!(cache.paths_of(&calls[1])[0].fill, VertexRange::new(4, 4));
        assert_eq!(calls[0].uniforms[1], UniformInfo::default());
    }

    #[test]
    fn batch_exposes_everything_and_clear_empties() {
        let mut cache = RenderCache::new(true);
        cache.render_triangles(&Paint::default(), &Scissor::disabled(), 1.0, &scratch(3));
        let batch = cache.batch(Viewport::new(10.0, 10.0, 1.0));
        assert_eq!(batch.calls.len(), 1);
        assert_eq!(batch.vertices.len(), 3);
        assert!(batch.paths_of(&batch.calls[0]).is_empty());

        cache.clear();
        assert!(cache.batch(Viewport::default()).is_empty());
    }

    #[test]
    fn empty_input_records_nothing() {
        let mut cache = RenderCache::new(false);
        cache.render_fill(&Paint::default(), &Scissor::disabled(), 1.0, [0.0; 4], &[], &[]);
        cache.render_stroke(&Paint::default(), &Scissor::disabled(), 1.0, 1.0, &[], &[]);
        cache.render_triangles(&Paint::default(), &Scissor::disabled(), 1.0, &[]);
        assert!(cache.calls().is_empty());
    }

    #[test]
    fn paths_without_geometry_record_nothing() {
        let mut cache = RenderCache::new(false);
        let empty = [Path { count: 0, ..Path::default() }];
        let sentinel = [1e6, 1e6, -1e6, -1e6];
        cache.render_fill(&Paint::default(), &Scissor::disabled(), 1.0, sentinel, &empty, &[]);
        cache.render_stroke(&Paint::default(), &Scissor::disabled(), 1.0, 1.0, &empty, &[]);
        assert!(cache.calls().is_empty());
        assert!(cache.vertices().is_empty());
    }
}
