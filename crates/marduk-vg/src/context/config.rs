/// Construction parameters for a [`Context`](super::Context).
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Generate anti-aliasing fringes around fills and strokes.
    ///
    /// Disable when the target is multisampled.
    pub antialias: bool,

    /// Emit a second uniform block for strokes so the renderer can draw
    /// overlapping translucent strokes through the stencil buffer.
    pub stencil_strokes: bool,

    /// Initial device pixel ratio; replaced by every `begin_frame`.
    pub device_pixel_ratio: f32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            stencil_strokes: false,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Geometry tolerances derived from the device pixel ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    /// Bezier flatness threshold.
    pub tess_tol: f32,
    /// Distance under which two points are treated as the same.
    pub dist_tol: f32,
    /// Width of the anti-aliasing fringe.
    pub fringe_width: f32,
}

impl Tolerances {
    pub fn for_ratio(device_pixel_ratio: f32) -> Self {
        let ratio = if device_pixel_ratio > 0.0 { device_pixel_ratio } else { 1.0 };
        Self {
            tess_tol: 0.25 / ratio,
            dist_tol: 0.01 / ratio,
            fringe_width: 1.0 / ratio,
        }
    }
}
