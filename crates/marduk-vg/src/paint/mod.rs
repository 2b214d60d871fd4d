//! Paint model shared between the context and renderers.
//!
//! Scope:
//! - straight-alpha color representation
//! - the paint record (solid, gradients, image patterns)
//!
//! Every paint kind reduces to the same record: a transform into paint space,
//! a rounded-box extent, a feather and two colors. Renderers evaluate the box
//! SDF in paint space and blend between the colors.

pub mod color;
pub mod gradient;

pub use color::Color;

use crate::coords::Transform;
use crate::render::TextureId;

/// Fill or stroke style.
///
/// Plain `Copy` data: states and submitted calls hold their own copies.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Paint {
    /// Paint space to frame space.
    pub xform: Transform,
    /// Half-size of the rounded box (or gradient span for linear gradients).
    pub extent: [f32; 2],
    pub radius: f32,
    pub feather: f32,
    pub inner_color: Color,
    pub outer_color: Color,
    pub image: Option<TextureId>,
}

impl Paint {
    /// Solid color paint.
    pub fn color(color: Color) -> Self {
        Self {
            xform: Transform::identity(),
            extent: [0.0, 0.0],
            radius: 0.0,
            feather: 1.0,
            inner_color: color,
            outer_color: color,
            image: None,
        }
    }

    /// Multiplies both colors' alpha by `factor`.
    #[inline]
    pub fn fade(&mut self, factor: f32) {
        self.inner_color.a *= factor;
        self.outer_color.a *= factor;
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::color(Color::black())
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::color(color)
    }
}
