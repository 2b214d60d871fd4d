//! Coordinate and geometry types shared across the path pipeline.
//!
//! Canonical space:
//! - origin top-left
//! - +X right, +Y down
//!
//! User-space coordinates are mapped through the context's current
//! [`Transform`] at record time, so everything downstream of the command list
//! works in device-independent "frame" units.

mod corner_radii;
mod rect;
mod transform;
mod vec2;
mod viewport;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use transform::{deg_to_rad, rad_to_deg, Transform};
pub use vec2::Vec2;
pub use viewport::Viewport;
