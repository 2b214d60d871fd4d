//! Path recording, flattening and tessellation.
//!
//! Pipeline per `fill`/`stroke`:
//!
//!   CommandList ──flatten──▶ PathCache points ──calculate_joins──▶
//!   expand_fill / expand_stroke ──▶ scratch vertices + per-path ranges
//!
//! Everything here works in frame coordinates: commands are transformed when
//! recorded, so the cache never sees the user transform.

pub mod bezier;
mod cache;
mod command;
mod fill;
mod joins;
mod point;
mod shapes;
mod stroke;
mod style;

pub use bezier::{CubicBez, MAX_FLATTEN_DEPTH};
pub use cache::{PathCache, poly_area};
pub use command::{Command, CommandList, PathRecorder};
pub use point::{Path, Point, PointFlags};
pub use shapes::KAPPA90;
pub use stroke::{StrokeStyle, curve_divs, round_join_steps};
pub use style::{LineCap, LineJoin, Winding};
