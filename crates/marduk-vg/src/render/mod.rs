//! Renderer boundary.
//!
//! The tessellator never talks to a GPU. It batches vertices and draw calls
//! into a [`RenderCache`] and hands a borrowed [`DrawBatch`] to whatever
//! [`Renderer`] the context was built with.
//!
//! Convention:
//! - vertex positions are in frame units (user space mapped through the
//!   context transform), top-left origin, +Y down
//! - uniform colors are premultiplied

mod cache;
mod renderer;
mod uniform;
mod vertex;

pub use cache::{CallInfo, CallKind, PathRange, RenderCache};
pub use renderer::{DrawBatch, ImageFlags, Renderer, TextureFormat, TextureId};
pub use uniform::{ShaderType, UniformInfo};
pub use vertex::{Vertex, VertexRange};
