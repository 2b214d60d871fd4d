//! Drawing context: state stack, path recording and the fill/stroke pipeline.
//!
//! A [`Context`] owns everything per frame:
//! - the command list of the current path
//! - the path cache (flattened points, scratch vertices)
//! - the render cache of batched calls
//! - the state stack (paints, stroke style, transform, scissor)
//!
//! It talks to the GPU only through the injected [`Renderer`](crate::render::Renderer).

mod config;
mod ctx;
mod scissor;
mod state;

pub use config::{ContextConfig, Tolerances};
pub use ctx::{Context, FrameStats};
pub use scissor::Scissor;
pub use state::{ContextState, MAX_STATES};
