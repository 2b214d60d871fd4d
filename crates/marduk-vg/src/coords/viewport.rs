/// Frame viewport in logical pixels plus the device pixel ratio it maps with.
///
/// Handed to renderers with every draw batch so they can set up their
/// projection without a separate side channel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self { width, height, device_pixel_ratio }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}
