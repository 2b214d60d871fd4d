use bytemuck::{Pod, Zeroable};

use crate::context::Scissor;
use crate::paint::Paint;

/// Fragment program selector carried in [`UniformInfo::shader_type`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum ShaderType {
    /// Rounded-box gradient between inner and outer color.
    FillGradient = 0,
    /// Image pattern sampled in paint space.
    FillImage = 1,
    /// Flat output for stencil passes.
    Simple = 2,
    /// Textured triangles (glyph quads and the like).
    Image = 3,
}

/// Per-draw uniform block, captured by value when a call is recorded.
///
/// Layout (176 bytes, all 4-byte scalars, no padding):
///
///  offset   0  scissor_mat   [f32; 12]  inverse scissor transform, 3×4 column-major
///  offset  48  paint_mat     [f32; 12]  inverse paint transform, 3×4 column-major
///  offset  96  inner_color   [f32; 4]   premultiplied
///  offset 112  outer_color   [f32; 4]   premultiplied
///  offset 128  scissor_ext   [f32; 2]
///  offset 136  scissor_scale [f32; 2]
///  offset 144  extent        [f32; 2]
///  offset 152  radius        f32
///  offset 156  feather       f32
///  offset 160  stroke_mult   f32
///  offset 164  stroke_thr    f32
///  offset 168  shader_type   u32
///  offset 172  _pad          u32
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct UniformInfo {
    pub scissor_mat: [f32; 12],
    pub paint_mat: [f32; 12],
    pub inner_color: [f32; 4],
    pub outer_color: [f32; 4],
    pub scissor_ext: [f32; 2],
    pub scissor_scale: [f32; 2],
    pub extent: [f32; 2],
    pub radius: f32,
    pub feather: f32,
    pub stroke_mult: f32,
    pub stroke_thr: f32,
    pub shader_type: u32,
    pub _pad: u32,
}

impl UniformInfo {
    /// Stroke threshold that disables the stencil-stroke discard.
    pub const NO_STROKE_THRESHOLD: f32 = -1.0;

    /// Uniform for the stencil (shape) pass of a non-convex fill.
    pub fn simple() -> Self {
        Self {
            stroke_thr: Self::NO_STROKE_THRESHOLD,
            shader_type: ShaderType::Simple as u32,
            ..Self::default()
        }
    }

    /// Bakes `paint` and `scissor` into a uniform block.
    ///
    /// `width` is the stroke width (or the fringe width for fills) and feeds
    /// the anti-aliasing multiplier `(width/2 + fringe/2) / fringe`.
    pub fn from_paint(
        paint: &Paint,
        scissor: &Scissor,
        width: f32,
        fringe: f32,
        stroke_thr: f32,
    ) -> Self {
        let mut u = Self {
            inner_color: paint.inner_color.premultiplied(),
            outer_color: paint.outer_color.premultiplied(),
            extent: paint.extent,
            stroke_mult: (width * 0.5 + fringe * 0.5) / fringe,
            stroke_thr,
            ..Self::default()
        };

        if scissor.is_disabled() {
            u.scissor_ext = [1.0, 1.0];
            u.scissor_scale = [1.0, 1.0];
        } else {
            let x = scissor.xform.0;
            u.scissor_mat = scissor.xform.inverse().to_mat3x4();
            u.scissor_ext = scissor.extent;
            u.scissor_scale = [
                (x[0] * x[0] + x[2] * x[2]).sqrt() / fringe,
                (x[1] * x[1] + x[3] * x[3]).sqrt() / fringe,
            ];
        }

        u.paint_mat = paint.xform.inverse().to_mat3x4();
        if paint.image.is_some() {
            u.shader_type = ShaderType::FillImage as u32;
        } else {
            u.shader_type = ShaderType::FillGradient as u32;
            u.radius = paint.radius;
            u.feather = paint.feather;
        }

        u
    }

    #[inline]
    pub fn shader(&self) -> ShaderType {
        match self.shader_type {
            0 => ShaderType::FillGradient,
            1 => ShaderType::FillImage,
            3 => ShaderType::Image,
            _ => ShaderType::Simple,
        }
    }
}
