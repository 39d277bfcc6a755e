//! Reference object calibration.
//!
//! Lesion photos include an ISL1 coin as a size reference. This module
//! loads the photo, finds the coin with a gradient Hough transform and
//! turns its known physical diameter into a pixel-to-millimeter scale.

mod annotate;
mod hough;
mod load;
mod reference;
mod types;

pub use annotate::annotate_circles;
pub use hough::{detect_circles, to_grayscale};
pub use load::{decode_reference_image, load_reference_image, photo_orientation, Orientation};
pub use reference::{recognize_reference, recognize_reference_file};
pub use types::{
    CalibrateError, CircleDetectionParams, DetectedCircle, PixelScale, ReferenceMeasurement,
    ISL1_DIAMETER_MM,
};
