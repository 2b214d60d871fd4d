use crate::buffer::GrowBuffer;
use crate::coords::{Transform, Vec2};

use super::Winding;
use super::bezier::CubicBez;

/// Recorded path command. Points are already mapped into frame space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Command {
    MoveTo(Vec2),
    LineTo(Vec2),
    BezierTo(Vec2, Vec2, Vec2),
    #[default]
    Close,
    Winding(Winding),
}

/// Command stream for the path currently being built.
///
/// Also tracks the last recorded point in *user* space, which is what
/// `quad_to` and `arc_to` continue from.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: GrowBuffer<Command>,
    last: Vec2,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.last = Vec2::zero();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn commands(&self) -> &[Command] {
        self.commands.as_slice()
    }

    /// Last recorded point in user space.
    #[inline]
    pub fn last_point(&self) -> Vec2 {
        self.last
    }

    /// Starts recording under `xform`.
    ///
    /// `dist_tol` is the coincidence tolerance used by `arc_to`.
    pub fn record(&mut self, xform: Transform, dist_tol: f32) -> PathRecorder<'_> {
        PathRecorder { list: self, xform, dist_tol }
    }
}

/// Borrowed recorder that maps user-space input through a fixed transform.
pub struct PathRecorder<'a> {
    list: &'a mut CommandList,
    xform: Transform,
    pub(super) dist_tol: f32,
}

impl PathRecorder<'_> {
    #[inline]
    pub(super) fn has_commands(&self) -> bool {
        !self.list.is_empty()
    }

    #[inline]
    pub(super) fn last_point(&self) -> Vec2 {
        self.list.last
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let p = Vec2::new(x, y);
        self.list.last = p;
        self.list.commands.push(Command::MoveTo(self.xform.apply(p)));
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let p = Vec2::new(x, y);
        self.list.last = p;
        self.list.commands.push(Command::LineTo(self.xform.apply(p)));
    }

    pub fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let p = Vec2::new(x, y);
        self.list.last = p;
        self.list.commands.push(Command::BezierTo(
            self.xform.apply(Vec2::new(c1x, c1y)),
            self.xform.apply(Vec2::new(c2x, c2y)),
            self.xform.apply(p),
        ));
    }

    /// Quadratic segment, recorded as the equivalent cubic.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let cubic = CubicBez::from_quad(self.list.last, Vec2::new(cx, cy), Vec2::new(x, y));
        self.bezier_to(cubic.p1.x, cubic.p1.y, cubic.p2.x, cubic.p2.y, x, y);
    }

    pub fn close(&mut self) {
        self.list.commands.push(Command::Close);
    }

    pub fn winding(&mut self, dir: Winding) {
        self.list.commands.push(Command::Winding(dir));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_transformed_at_record_time() {
        let mut list = CommandList::new();
        {
            let mut rec = list.record(Transform::translate(10.0, 20.0), 0.01);
            rec.move_to(1.0, 2.0);
            rec.line_to(3.0, 4.0);
        }
        assert_eq!(
            list.commands(),
            &[
                Command::MoveTo(Vec2::new(11.0, 22.0)),
                Command::LineTo(Vec2::new(13.0, 24.0)),
            ]
        );
        // The continuation point stays in user space.
        assert_eq!(list.last_point(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn close_and_winding_are_not_transformed_and_keep_last_point() {
        let mut list = CommandList::new();
        {
            let mut rec = list.record(Transform::scale(2.0, 2.0), 0.01);
            rec.move_to(5.0, 5.0);
            rec.winding(Winding::Cw);
            rec.close();
        }
        assert_eq!(list.commands()[1], Command::Winding(Winding::Cw));
        assert_eq!(list.commands()[2], Command::Close);
        assert_eq!(list.last_point(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn quad_to_uses_two_thirds_controls() {
        let mut list = CommandList::new();
        {
            let mut rec = list.record(Transform::identity(), 0.01);
            rec.move_to(0.0, 0.0);
            rec.quad_to(30.0, 30.0, 60.0, 0.0);
        }
        let Command::BezierTo(c1, c2, end) = list.commands()[1] else {
            panic!("expected a cubic");
        };
        assert!(c1.approx_eq(Vec2::new(20.0, 20.0), 1e-4));
        assert!(c2.approx_eq(Vec2::new(40.0, 20.0), 1e-4));
        assert_eq!(end, Vec2::new(60.0, 0.0));
    }

    #[test]
    fn clear_resets_stream() {
        let mut list = CommandList::new();
        list.record(Transform::identity(), 0.01).move_to(1.0, 1.0);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.last_point(), Vec2::zero());
    }
}
