/// Shape at the open ends of a stroked sub-path.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    /// Butt cap pushed out by half the stroke width.
    Square,
}

/// Shape where two stroked segments meet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Declared orientation of a sub-path.
///
/// Solid shapes wind counter-clockwise, holes clockwise; the flattener
/// reverses point order when the geometry disagrees with the declaration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Winding {
    #[default]
    Ccw,
    Cw,
}

impl Winding {
    pub const SOLID: Winding = Winding::Ccw;
    pub const HOLE: Winding = Winding::Cw;
}
