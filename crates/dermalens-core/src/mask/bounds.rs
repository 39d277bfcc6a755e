//! Content bounding box extraction and cropping for masks.
//!
//! # Algorithm
//!
//! The bounding box search walks inward from the edges of the search
//! window instead of visiting every pixel:
//!
//! 1. The top edge advances downward while the current row contains no
//!    foreground within the window's column range.
//! 2. The bottom edge retreats upward the same way.
//! 3. The left and right edges then advance/retreat, but only test the
//!    rows kept by the first two scans.
//!
//! On typical segmentation masks (one central blob) this touches a small
//! fraction of the pixels.

use crate::geometry::BoundingBox;

use super::{Mask, MaskError};

/// Whether any pixel of row `y` within `min_x..=max_x` is foreground.
#[inline]
fn row_has_foreground(mask: &Mask, y: u32, min_x: u32, max_x: u32) -> bool {
    (min_x..=max_x).any(|x| mask.is_foreground(x, y))
}

/// Whether any pixel of column `x` within `min_y..=max_y` is foreground.
#[inline]
fn col_has_foreground(mask: &Mask, x: u32, min_y: u32, max_y: u32) -> bool {
    (min_y..=max_y).any(|y| mask.is_foreground(x, y))
}

fn validate_window(mask: &Mask, window: &BoundingBox) -> Result<(), MaskError> {
    let valid = window.min_y <= window.max_y
        && window.min_x <= window.max_x
        && window.max_y < mask.height
        && window.max_x < mask.width;
    if valid {
        Ok(())
    } else {
        Err(MaskError::WindowOutOfBounds {
            min_y: window.min_y,
            max_y: window.max_y,
            min_x: window.min_x,
            max_x: window.max_x,
            width: mask.width,
            height: mask.height,
        })
    }
}

/// Find the tight bounding box of the foreground within a mask.
///
/// The search is limited to `window` when one is given, otherwise the
/// whole mask is scanned. All four edges of the returned box touch at
/// least one foreground pixel.
///
/// # Arguments
///
/// * `mask` - Mask to search
/// * `window` - Optional region to restrict the search to
///
/// # Errors
///
/// Returns `MaskError::EmptyMask` when the searched region contains no
/// foreground pixel, and `MaskError::WindowOutOfBounds` when the window
/// does not fit inside the mask.
///
/// # Example
///
/// ```
/// use dermalens_core::mask::{find_content_bounds, Mask};
///
/// let mut mask = Mask::zeros(10, 10);
/// mask.pixel_mut(4, 7)[0] = 255;
///
/// let bounds = find_content_bounds(&mask, None).unwrap();
/// assert_eq!((bounds.min_y, bounds.max_y), (7, 7));
/// assert_eq!((bounds.min_x, bounds.max_x), (4, 4));
/// ```
pub fn find_content_bounds(
    mask: &Mask,
    window: Option<BoundingBox>,
) -> Result<BoundingBox, MaskError> {
    if mask.is_empty() {
        return Err(MaskError::EmptyMask);
    }

    let window = window.unwrap_or(BoundingBox {
        min_y: 0,
        max_y: mask.height - 1,
        min_x: 0,
        max_x: mask.width - 1,
    });
    validate_window(mask, &window)?;

    let BoundingBox {
        mut min_y,
        mut max_y,
        mut min_x,
        mut max_x,
    } = window;

    // Top edge: march down until a row contains foreground. Only this
    // scan can exhaust the window; the remaining three are guaranteed to
    // stop at a row/column the earlier scans proved non-empty.
    while !row_has_foreground(mask, min_y, min_x, max_x) {
        if min_y == max_y {
            return Err(MaskError::EmptyMask);
        }
        min_y += 1;
    }

    // Bottom edge
    while !row_has_foreground(mask, max_y, min_x, max_x) {
        max_y -= 1;
    }

    // Left and right edges search only the rows kept above
    while !col_has_foreground(mask, min_x, min_y, max_y) {
        min_x += 1;
    }
    while !col_has_foreground(mask, max_x, min_y, max_y) {
        max_x -= 1;
    }

    Ok(BoundingBox {
        min_y,
        max_y,
        min_x,
        max_x,
    })
}

/// Copy the region covered by a bounding box out of a mask.
///
/// Both endpoints of the box are part of the output, so the result is
/// `bounds.width()` by `bounds.height()` pixels. Boxes reaching outside
/// the mask are clamped to its extent.
///
/// # Arguments
///
/// * `mask` - Source mask
/// * `bounds` - Inclusive region to copy
///
/// # Returns
///
/// A new `Mask` containing only the selected region, with the channel
/// count of the source.
pub fn crop_to_bounds(mask: &Mask, bounds: &BoundingBox) -> Mask {
    if mask.is_empty() {
        return mask.clone();
    }

    // Clamp to the mask extent
    let min_y = bounds.min_y.min(mask.height - 1);
    let max_y = bounds.max_y.min(mask.height - 1);
    let min_x = bounds.min_x.min(mask.width - 1);
    let max_x = bounds.max_x.min(mask.width - 1);

    // Fast path: full-extent crop returns a clone
    if min_y == 0 && min_x == 0 && max_y == mask.height - 1 && max_x == mask.width - 1 {
        return mask.clone();
    }

    // Ensure minimum dimensions
    let out_width = (max_x + 1).saturating_sub(min_x).max(1);
    let out_height = (max_y + 1).saturating_sub(min_y).max(1);
    let channels = mask.channels as usize;
    let row_bytes = out_width as usize * channels;

    let mut output = vec![0u8; out_height as usize * row_bytes];

    // Copy pixel data row by row for efficiency
    for y in 0..out_height {
        let src_y = min_y + y;
        let src_start = ((src_y * mask.width + min_x) as usize) * channels;
        let dst_start = y as usize * row_bytes;

        output[dst_start..dst_start + row_bytes]
            .copy_from_slice(&mask.pixels[src_start..src_start + row_bytes]);
    }

    Mask::with_channels(out_width, out_height, mask.channels, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
