//! Segmentation mask storage and content geometry.
//!
//! This module provides the mask buffer type plus the operations the
//! lesion pipeline runs on segmentation output:
//! - Tight bounding box extraction with an optional search window
//! - Cropping a mask to a bounding box
//! - Binarization back to a two-valued mask
//!
//! # Foreground Convention
//!
//! A pixel belongs to the foreground when any of its channels is
//! non-zero. Operations that produce new foreground (see
//! [`binarize`]) write the full [`FOREGROUND`] value.

mod binarize;
mod bounds;
mod types;

pub use binarize::{binarize, FOREGROUND};
pub use bounds::{crop_to_bounds, find_content_bounds};
pub use types::{Mask, MaskError};
