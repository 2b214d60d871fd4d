use anyhow::{Context as _, Result};

use crate::coords::{CornerRadii, Rect, Transform, Vec2, Viewport};
use crate::paint::{Color, Paint};
use crate::path::{Command, CommandList, LineCap, LineJoin, PathCache, PathRecorder, StrokeStyle, Winding};
use crate::render::{ImageFlags, RenderCache, Renderer, TextureFormat, TextureId, Vertex};

use super::config::{ContextConfig, Tolerances};
use super::state::{ContextState, MAX_STATES};
use super::Scissor;

/// Maximum stroke width in frame units after scaling.
const MAX_STROKE_WIDTH: f32 = 200.0;

/// Miter limit used when insetting fills for anti-aliasing.
const FILL_MITER_LIMIT: f32 = 2.4;

/// Per-frame counters, reset by `begin_frame`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub fill_triangles: usize,
    pub stroke_triangles: usize,
    pub triangles: usize,
}

/// Immediate-mode drawing context.
///
/// Records paths, tessellates them on `fill` / `stroke` and batches the
/// result until `flush` hands it to the renderer `R`.
///
/// Invariant: vertex and path indices recorded in a frame are valid only
/// until the next `flush`, `reset` or `begin_frame`.
pub struct Context<R: Renderer> {
    renderer: R,
    config: ContextConfig,
    commands: CommandList,
    paths: PathCache,
    calls: RenderCache,
    state: ContextState,
    saved: Vec<ContextState>,
    tol: Tolerances,
    viewport: Viewport,
    stats: FrameStats,
    scratch: Vec<Vertex>,
}

impl<R: Renderer> Context<R> {
    pub fn new(renderer: R, config: ContextConfig) -> Self {
        let ratio = config.device_pixel_ratio;
        Self {
            renderer,
            calls: RenderCache::new(config.stencil_strokes),
            commands: CommandList::new(),
            paths: PathCache::new(),
            state: ContextState::default(),
            saved: Vec::with_capacity(MAX_STATES),
            tol: Tolerances::for_ratio(ratio),
            viewport: Viewport::new(0.0, 0.0, ratio),
            stats: FrameStats::default(),
            scratch: Vec::new(),
            config,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Current (top of stack) render state.
    #[inline]
    pub fn state(&self) -> &ContextState {
        &self.state
    }

    /// Draw calls recorded since the last flush.
    #[inline]
    pub fn render_cache(&self) -> &RenderCache {
        &self.calls
    }

    /// Flattened geometry of the current path.
    #[inline]
    pub fn path_cache(&self) -> &PathCache {
        &self.paths
    }

    /// Recorded commands of the current path, in frame coordinates.
    #[inline]
    pub fn commands(&self) -> &[Command] {
        self.commands.commands()
    }

    #[inline]
    pub fn tolerances(&self) -> Tolerances {
        self.tol
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Starts a frame of `width × height` logical pixels.
    ///
    /// Resets the state stack to a single default state and drops anything
    /// recorded but not flushed.
    pub fn begin_frame(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.saved.clear();
        self.state = ContextState::default();
        self.set_device_pixel_ratio(device_pixel_ratio);
        self.viewport.width = width;
        self.viewport.height = height;
        self.reset();
        self.stats = FrameStats::default();
        log::trace!("begin frame {width}x{height} @{device_pixel_ratio}");
    }

    /// Discards recorded draw calls and the current path.
    pub fn reset(&mut self) {
        self.calls.clear();
        self.commands.clear();
        self.paths.clear();
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.tol = Tolerances::for_ratio(ratio);
        self.viewport.device_pixel_ratio = ratio;
    }

    /// Submits every recorded call to the renderer.
    ///
    /// The batch is cleared afterwards even when the renderer fails.
    pub fn flush(&mut self) -> Result<()> {
        let batch = self.calls.batch(self.viewport);
        let result = self
            .renderer
            .draw(&batch)
            .context("renderer failed to draw frame");

        log::debug!(
            "flush: {} calls, {} vertices, {} draw calls, {} fill / {} stroke / {} triangle tris",
            batch.calls.len(),
            batch.vertices.len(),
            self.stats.draw_calls,
            self.stats.fill_triangles,
            self.stats.stroke_triangles,
            self.stats.triangles,
        );

        self.calls.clear();
        result
    }

    // ── path construction ─────────────────────────────────────────────────

    /// Clears the current path.
    pub fn begin_path(&mut self) {
        self.commands.clear();
        self.paths.clear();
    }

    #[inline]
    fn recorder(&mut self) -> PathRecorder<'_> {
        self.commands.record(self.state.xform, self.tol.dist_tol)
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.recorder().move_to(x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.recorder().line_to(x, y);
    }

    pub fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.recorder().bezier_to(c1x, c1y, c2x, c2y, x, y);
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.recorder().quad_to(cx, cy, x, y);
    }

    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.recorder().arc_to(x1, y1, x2, y2, radius);
    }

    pub fn arc(&mut self, cx: f32, cy: f32, r: f32, a0: f32, a1: f32, dir: Winding) {
        self.recorder().arc(cx, cy, r, a0, a1, dir);
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.recorder().rect(x, y, w, h);
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        self.recorder().rounded_rect(x, y, w, h, r);
    }

    pub fn rounded_rect_varying(&mut self, x: f32, y: f32, w: f32, h: f32, radii: CornerRadii) {
        self.recorder().rounded_rect_varying(x, y, w, h, radii);
    }

    pub fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        self.recorder().ellipse(cx, cy, rx, ry);
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.recorder().circle(cx, cy, r);
    }

    pub fn close_path(&mut self) {
        self.recorder().close();
    }

    /// Declares the winding of the current sub-path (solid or hole).
    pub fn path_winding(&mut self, dir: Winding) {
        self.recorder().winding(dir);
    }

    // ── style ─────────────────────────────────────────────────────────────

    pub fn fill_color(&mut self, color: Color) {
        self.state.fill = Paint::color(color);
    }

    /// Sets the fill paint; its transform is taken relative to the current
    /// transform.
    pub fn fill_paint(&mut self, mut paint: Paint) {
        paint.xform = paint.xform.then(self.state.xform);
        self.state.fill = paint;
    }

    pub fn stroke_color(&mut self, color: Color) {
        self.state.stroke = Paint::color(color);
    }

    pub fn stroke_paint(&mut self, mut paint: Paint) {
        paint.xform = paint.xform.then(self.state.xform);
        self.state.stroke = paint;
    }

    pub fn stroke_width(&mut self, width: f32) {
        self.state.stroke_width = width;
    }

    pub fn line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    pub fn line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    pub fn miter_limit(&mut self, limit: f32) {
        self.state.miter_limit = limit;
    }

    pub fn global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha;
    }

    // ── transforms ────────────────────────────────────────────────────────

    fn pre_transform(&mut self, t: Transform) {
        self.state.xform = self.state.xform.pre_multiply(t);
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.pre_transform(Transform::translate(x, y));
    }

    pub fn rotate(&mut self, angle: f32) {
        self.pre_transform(Transform::rotate(angle));
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.pre_transform(Transform::scale(x, y));
    }

    pub fn skew_x(&mut self, angle: f32) {
        self.pre_transform(Transform::skew_x(angle));
    }

    pub fn skew_y(&mut self, angle: f32) {
        self.pre_transform(Transform::skew_y(angle));
    }

    /// Pre-multiplies the current transform by `[a b c d e f]`.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.pre_transform(Transform([a, b, c, d, e, f]));
    }

    pub fn reset_transform(&mut self) {
        self.state.xform = Transform::identity();
    }

    #[inline]
    pub fn current_transform(&self) -> Transform {
        self.state.xform
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Clips to a rectangle in the current local frame.
    pub fn scissor(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.state.scissor = Scissor::from_rect(Rect::new(x, y, w, h), self.state.xform);
    }

    /// Narrows the scissor to its overlap with a rectangle in the current
    /// local frame.
    ///
    /// The existing scissor is taken as its axis-aligned bounds in the
    /// current frame, so rotated clips intersect conservatively.
    pub fn intersect_scissor(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if self.state.scissor.is_disabled() {
            self.scissor(x, y, w, h);
            return;
        }

        let r = self
            .state
            .scissor
            .bounds_in(self.state.xform)
            .clamped_intersection(Rect::new(x, y, w, h));
        self.scissor(r.origin.x, r.origin.y, r.size.x, r.size.y);
    }

    pub fn reset_scissor(&mut self) {
        self.state.scissor = Scissor::disabled();
    }

    // ── state stack ───────────────────────────────────────────────────────

    /// Pushes a copy of the current state. Ignored past the stack limit.
    pub fn save_state(&mut self) {
        if self.saved.len() + 1 >= MAX_STATES {
            log::debug!("save_state ignored: state stack full ({MAX_STATES})");
            return;
        }
        self.saved.push(self.state);
    }

    /// Pops the most recently saved state. Ignored when nothing is saved.
    pub fn restore_state(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => log::debug!("restore_state ignored: state stack empty"),
        }
    }

    /// Resets the current state to defaults without touching the stack.
    pub fn reset_state(&mut self) {
        self.state = ContextState::default();
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Fills the current path with the fill paint.
    pub fn fill(&mut self) {
        let tol = self.tol;
        self.paths.flatten(self.commands.commands(), tol.tess_tol, tol.dist_tol);

        let fringe = if self.config.antialias { tol.fringe_width } else { 0.0 };
        self.paths
            .expand_fill(fringe, tol.fringe_width, LineJoin::Miter, FILL_MITER_LIMIT);

        let mut paint = self.state.fill;
        paint.fade(self.state.alpha);

        self.calls.render_fill(
            &paint,
            &self.state.scissor,
            tol.fringe_width,
            self.paths.bounds(),
            self.paths.paths(),
            self.paths.vertices(),
        );

        for path in self.paths.paths().iter().filter(|p| !p.is_empty()) {
            self.stats.fill_triangles += path.fill.count.saturating_sub(2);
            self.stats.fill_triangles += path.stroke.count.saturating_sub(2);
            self.stats.draw_calls += 2;
        }
    }

    /// Strokes the current path with the stroke paint.
    ///
    /// Strokes thinner than the fringe are drawn at fringe width with their
    /// alpha reduced by the squared coverage ratio.
    pub fn stroke(&mut self) {
        let tol = self.tol;
        let state = self.state;

        let scale = state.xform.average_scale();
        let mut width = (state.stroke_width * scale).clamp(0.0, MAX_STROKE_WIDTH);
        let mut paint = state.stroke;

        if width < tol.fringe_width {
            let coverage = (width / tol.fringe_width).clamp(0.0, 1.0);
            paint.fade(coverage * coverage);
            width = tol.fringe_width;
        }
        paint.fade(state.alpha);

        self.paths.flatten(self.commands.commands(), tol.tess_tol, tol.dist_tol);
        self.paths.expand_stroke(StrokeStyle {
            half_width: width * 0.5,
            fringe: if self.config.antialias { tol.fringe_width } else { 0.0 },
            cap: state.line_cap,
            join: state.line_join,
            miter_limit: state.miter_limit,
            tess_tol: tol.tess_tol,
        });

        self.calls.render_stroke(
            &paint,
            &state.scissor,
            tol.fringe_width,
            width,
            self.paths.paths(),
            self.paths.vertices(),
        );

        for path in self.paths.paths().iter().filter(|p| !p.is_empty()) {
            self.stats.stroke_triangles += path.stroke.count.saturating_sub(2);
            self.stats.draw_calls += 1;
        }
    }

    /// Draws a textured triangle list (e.g. glyph quads) with the fill paint.
    ///
    /// Positions are in user space and go through the current transform;
    /// texture coordinates pass through untouched.
    pub fn draw_triangles(&mut self, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }

        let xform = self.state.xform;
        self.scratch.clear();
        self.scratch.extend(vertices.iter().map(|v| {
            let p = xform.apply(Vec2::new(v.x, v.y));
            Vertex::new(p.x, p.y, v.u, v.v)
        }));

        let mut paint = self.state.fill;
        paint.fade(self.state.alpha);

        self.calls.render_triangles(&paint, &self.state.scissor, self.tol.fringe_width, &self.scratch);
        self.stats.triangles += vertices.len() / 3;
        self.stats.draw_calls += 1;
    }

    // ── images ────────────────────────────────────────────────────────────

    /// Creates an image, optionally with initial pixels
    /// (`width * height * format.bytes_per_pixel()` bytes).
    pub fn create_image(
        &mut self,
        format: TextureFormat,
        width: u32,
        height: u32,
        flags: ImageFlags,
        data: Option<&[u8]>,
    ) -> Result<TextureId> {
        anyhow::ensure!(width > 0 && height > 0, "image has zero size ({width}x{height})");
        if let Some(data) = data {
            let needed = width as usize * height as usize * format.bytes_per_pixel();
            anyhow::ensure!(
                data.len() >= needed,
                "image data too short: {} bytes, need {needed}",
                data.len()
            );
        }

        let id = self
            .renderer
            .create_texture(format, width, height, flags, data)
            .context("failed to create image")?;
        log::debug!("created image {id:?} ({width}x{height} {format:?})");
        Ok(id)
    }

    /// Replaces the full contents of `image`.
    pub fn update_image(&mut self, image: TextureId, data: &[u8]) -> Result<()> {
        let (width, height) = self.image_size(image)?;
        self.renderer
            .update_texture(image, 0, 0, width, height, data)
            .with_context(|| format!("failed to update image {image:?}"))
    }

    pub fn image_size(&self, image: TextureId) -> Result<(u32, u32)> {
        self.renderer
            .texture_size(image)
            .with_context(|| format!("unknown image {image:?}"))
    }

    pub fn delete_image(&mut self, image: TextureId) -> Result<()> {
        self.renderer
            .delete_texture(image)
            .with_context(|| format!("failed to delete image {image:?}"))
    }
}
