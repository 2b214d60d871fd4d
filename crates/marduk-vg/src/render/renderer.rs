use anyhow::Result;
use bitflags::bitflags;

use crate::coords::Viewport;

use super::{CallInfo, PathRange, Vertex};

/// Opaque texture handle issued by a [`Renderer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// Pixel layout of texture data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureFormat {
    /// One byte per pixel, used as coverage (e.g. a glyph atlas).
    Alpha,
    /// Four bytes per pixel, straight or premultiplied RGBA.
    Rgba,
}

impl TextureFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Alpha => 1,
            TextureFormat::Rgba => 4,
        }
    }
}

bitflags! {
    /// Sampling and storage options for textures.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct ImageFlags: u32 {
        const GENERATE_MIPMAPS = 1 << 0;
        const REPEAT_X = 1 << 1;
        const REPEAT_Y = 1 << 2;
        /// Image rows are stored bottom-up.
        const FLIP_Y = 1 << 3;
        /// RGBA data is already premultiplied.
        const PREMULTIPLIED = 1 << 4;
        /// Nearest-neighbour sampling instead of linear.
        const NEAREST = 1 << 5;
    }
}

/// Immutable view of one frame's batched output.
///
/// Borrowed from the context's render cache; valid only for the duration of
/// [`Renderer::draw`].
#[derive(Debug, Copy, Clone)]
pub struct DrawBatch<'a> {
    pub viewport: Viewport,
    pub calls: &'a [CallInfo],
    pub paths: &'a [PathRange],
    pub vertices: &'a [Vertex],
}

impl<'a> DrawBatch<'a> {
    /// Per-sub-path vertex ranges belonging to `call`.
    #[inline]
    pub fn paths_of(&self, call: &CallInfo) -> &'a [PathRange] {
        &self.paths[call.first_path..call.first_path + call.path_count]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// GPU backend capability set consumed by the context.
///
/// The core never issues GPU commands itself. Implementations own textures
/// and translate [`DrawBatch`]es into API calls: stencil-then-cover for
/// `Fill`, direct draws for `ConvexFill` / `Triangles`, strip draws for
/// `Stroke`.
pub trait Renderer {
    /// Creates a texture, optionally uploading initial pixel data
    /// (`width * height * format.bytes_per_pixel()` bytes).
    fn create_texture(
        &mut self,
        format: TextureFormat,
        width: u32,
        height: u32,
        flags: ImageFlags,
        data: Option<&[u8]>,
    ) -> Result<TextureId>;

    /// Returns `(width, height)` in pixels.
    fn texture_size(&self, texture: TextureId) -> Result<(u32, u32)>;

    /// Replaces the pixels of a sub-rectangle. `data` covers the whole
    /// texture; only the rows/columns inside the rect are read.
    fn update_texture(
        &mut self,
        texture: TextureId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<()>;

    fn delete_texture(&mut self, texture: TextureId) -> Result<()>;

    /// Consumes a frame. Called once per [`flush`](crate::Context::flush);
    /// the data must not be retained past the call.
    fn draw(&mut self, batch: &DrawBatch<'_>) -> Result<()>;
}
