//! DermaLens Core - Mask geometry and scale calibration
//!
//! This crate provides the image-side building blocks of the DermaLens
//! lesion pipeline: bounding and cropping segmentation masks, lossless
//! rotation and orientation alignment, and recognition of the ISL1
//! reference coin for pixel-to-millimeter calibration.

pub mod calibrate;
pub mod geometry;
pub mod mask;
pub mod transform;

pub use calibrate::{recognize_reference, recognize_reference_file, ReferenceMeasurement};
pub use geometry::{distance, BoundingBox};
pub use mask::{binarize, crop_to_bounds, find_content_bounds, Mask, MaskError};
pub use transform::{align, compute_rotated_bounds, rotate, ResampleFilter};
