//! Mask transform operations: rotation and alignment.
//!
//! Rotation expands the output canvas so content is never clipped, which
//! makes the brute-force alignment sweep safe at every angle.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Origin is the top-left corner, rows grow downward

mod align;
mod rotation;

pub use align::align;
pub use rotation::{compute_rotated_bounds, rotate, ResampleFilter};
