//! Rotational alignment of lesion masks.
//!
//! Downstream measurements are taken against the mask's vertical extent,
//! so a mask is first brought into the orientation that maximizes it.
//! The search is a brute-force sweep over whole degrees in [0, 180);
//! angles beyond that range mirror ones inside it.

use crate::mask::{binarize, crop_to_bounds, find_content_bounds, Mask, MaskError};

use super::{rotate, ResampleFilter};

/// Rotate a mask into the orientation with the tallest cropped content.
///
/// Every whole-degree angle from 0 to 179 is tried: the mask is rotated,
/// cropped to its content, and the crop's height compared against the
/// best so far. The reference height starts at the input mask's full
/// height, so when no rotation produces a strictly taller crop the input
/// itself is returned uncropped. Callers therefore want to crop the mask
/// to its content before aligning it.
///
/// The winner is binarized before returning: bilinear resampling leaves
/// partial values along region boundaries, and measurements downstream
/// expect a two-valued mask.
///
/// # Errors
///
/// Returns `MaskError::EmptyMask` when the input mask has no foreground.
pub fn align(mask: &Mask) -> Result<Mask, MaskError> {
    // An input without content cannot be aligned
    find_content_bounds(mask, None)?;

    let mut best = mask.clone();
    let mut best_height = mask.height;
    let mut best_angle: Option<u32> = None;

    for angle in 0..180u32 {
        let rotated = rotate(mask, angle as f64, ResampleFilter::Bilinear);

        // Resampling can wash out very small masks at some angles; such
        // an orientation cannot win the sweep
        let bounds = match find_content_bounds(&rotated, None) {
            Ok(bounds) => bounds,
            Err(MaskError::EmptyMask) => continue,
            Err(e) => return Err(e),
        };

        let cropped = crop_to_bounds(&rotated, &bounds);
        if cropped.height > best_height {
            best_height = cropped.height;
            best_angle = Some(angle);
            best = cropped;
        }
    }

    match best_angle {
        Some(angle) => tracing::debug!(
            "alignment sweep selected {} deg (content height {} px)",
            angle,
            best_height
        ),
        None => tracing::debug!("alignment sweep kept the original orientation"),
    }

    Ok(binarize(&best))
}
