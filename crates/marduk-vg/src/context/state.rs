use crate::coords::Transform;
use crate::paint::{Color, Paint};
use crate::path::{LineCap, LineJoin};

use super::Scissor;

/// Maximum depth of the state stack, including the current state.
pub const MAX_STATES: usize = 32;

/// Render state saved and restored by `save_state` / `restore_state`.
///
/// Plain `Copy` data; pushing copies it, popping overwrites it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContextState {
    /// Fill paint, already composed with the transform active when it was set.
    pub fill: Paint,
    pub stroke: Paint,
    pub stroke_width: f32,
    pub miter_limit: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Global alpha applied on top of both paints.
    pub alpha: f32,
    pub xform: Transform,
    pub scissor: Scissor,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            fill: Paint::color(Color::white()),
            stroke: Paint::color(Color::black()),
            stroke_width: 1.0,
            miter_limit: 10.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            alpha: 1.0,
            xform: Transform::identity(),
            scissor: Scissor::disabled(),
        }
    }
}
