//! Marduk vector graphics core.
//!
//! Immediate-mode path tessellator: records move/line/bezier/arc commands,
//! flattens and expands them into anti-aliased fill and stroke geometry, and
//! batches the result as draw calls for a pluggable [`render::Renderer`].

pub mod buffer;
pub mod coords;
pub mod paint;
pub mod path;
pub mod render;
pub mod context;

pub mod logging;

pub use context::{Context, ContextConfig, ContextState, Scissor};
pub use coords::{CornerRadii, Rect, Transform, Vec2, Viewport};
pub use paint::{Color, Paint};
pub use path::{LineCap, LineJoin, Winding};
pub use render::{DrawBatch, ImageFlags, Renderer, TextureFormat, TextureId, Vertex};
