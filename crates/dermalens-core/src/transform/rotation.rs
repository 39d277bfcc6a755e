//! Mask rotation with lossless canvas expansion.
//!
//! Rotating a mask must never clip foreground, so the output canvas is
//! first grown to the bounding box of the rotated rectangle. Pixels are
//! then produced by inverse mapping: each output pixel is traced back
//! through the rotation and sampled from the source mask; samples that
//! fall outside the source stay background.
//!
//! # Algorithm
//!
//! For rotation by angle θ, the inverse transform is:
//! ```text
//! src_x = (dst_x - cx) * cos(-θ) - (dst_y - cy) * sin(-θ) + src_cx
//! src_y = (dst_x - cx) * sin(-θ) + (dst_y - cy) * cos(-θ) + src_cy
//! ```

use serde::{Deserialize, Serialize};

use crate::mask::Mask;

/// Resampling rule used when rotating a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbor sampling. Keeps a two-valued mask two-valued, at
    /// the cost of jagged region boundaries.
    Nearest,
    /// Bilinear interpolation. Smooth boundaries with partial values;
    /// binarize afterwards when a two-valued mask is needed.
    #[default]
    Bilinear,
}

/// Compute the canvas dimensions needed to hold a rotated mask.
///
/// When a mask is rotated, its corners extend beyond the original
/// rectangle. This returns the smallest canvas that still contains every
/// corner, which is the canvas [`rotate`] renders into.
///
/// # Arguments
///
/// * `width` - Original mask width
/// * `height` - Original mask height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
///
/// Tuple of (new_width, new_height) for the expanded canvas.
///
/// # Example
///
/// ```
/// use dermalens_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// let (w, h) = compute_rotated_bounds(64, 32, 90.0);
/// assert_eq!((w, h), (32, 64));
///
/// // No rotation preserves dimensions
/// let (w, h) = compute_rotated_bounds(64, 32, 0.0);
/// assert_eq!((w, h), (64, 32));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    // Normalize angle to handle 360, 720, etc.
    let abs_angle = (angle_degrees % 360.0).abs();

    // Fast paths: right-angle rotations have exact canvas sizes
    if abs_angle < 0.001 || (abs_angle - 180.0).abs() < 0.001 || (abs_angle - 360.0).abs() < 0.001
    {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle is:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate a mask around its center.
///
/// The output canvas is expanded per [`compute_rotated_bounds`] so no
/// foreground pixel is clipped; regions of the canvas with no source
/// coverage are background. Works for any channel count.
///
/// # Arguments
///
/// * `mask` - Source mask to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `filter` - Resampling rule (see [`ResampleFilter`])
///
/// # Returns
///
/// A new `Mask` with the rotated content. The dimensions usually differ
/// from the source due to canvas expansion.
pub fn rotate(mask: &Mask, angle_degrees: f64, filter: ResampleFilter) -> Mask {
    // Fast path: no rotation needed
    if angle_degrees.abs() < 0.001 {
        return mask.clone();
    }

    let (src_w, src_h) = (mask.width as f64, mask.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(mask.width, mask.height, angle_degrees);

    // Negate angle for correct visual rotation direction
    // (positive angle should rotate counter-clockwise visually)
    let angle_rad = -angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of source and destination canvases
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let channels = mask.channels as usize;
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * channels];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Translate destination point to origin at center
            let dx = dst_x as f64 - dst_cx;
            let dy = dst_y as f64 - dst_cy;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * channels;
            let out_pixel = &mut output[dst_idx..dst_idx + channels];

            match filter {
                ResampleFilter::Nearest => sample_nearest(mask, src_x, src_y, out_pixel),
                ResampleFilter::Bilinear => sample_bilinear(mask, src_x, src_y, out_pixel),
            }
        }
    }

    Mask::with_channels(dst_w, dst_h, mask.channels, output)
}

/// Sample the nearest source pixel, or background when out of bounds.
fn sample_nearest(mask: &Mask, x: f64, y: f64, out: &mut [u8]) {
    let px = x.round();
    let py = y.round();

    if px < 0.0 || py < 0.0 || px >= mask.width as f64 || py >= mask.height as f64 {
        out.fill(0);
        return;
    }

    out.copy_from_slice(mask.pixel(px as u32, py as u32));
}

/// Sample with bilinear interpolation over the 4 nearest source pixels,
/// weighting each by distance. Out-of-bounds samples are background.
fn sample_bilinear(mask: &Mask, x: f64, y: f64, out: &mut [u8]) {
    let (w, h) = (mask.width as i64, mask.height as i64);

    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        out.fill(0);
        return;
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = mask.pixel(x0, y0);
    let p10 = mask.pixel(x1, y0);
    let p01 = mask.pixel(x0, y1);
    let p11 = mask.pixel(x1, y1);

    // Bilinear interpolation formula
    for (c, dst) in out.iter_mut().enumerate() {
        let v = p00[c] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[c] as f64 * fx * (1.0 - fy)
            + p01[c] as f64 * (1.0 - fx) * fy
            + p11[c] as f64 * fx * fy;
        *dst = v.clamp(0.0, 255.0).round() as u8;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=128, 1u32..=128)
    }

    fn angle_strategy() -> impl Strategy<Value = f64> {
        -720.0f64..=720.0
    }

    proptest! {
        /// Property: Canvas dimensions are always positive.
        #[test]
        fn prop_bounds_positive(
            (width, height) in dimensions_strategy(),
            angle in angle_strategy(),
        ) {
            let (w, h) = compute_rotated_bounds(width, height, angle);
            prop_assert!(w >= 1);
            prop_assert!(h >= 1);
        }

        /// Property: Mirrored angles need the same canvas.
        #[test]
        fn prop_bounds_symmetric_in_sign(
            (width, height) in dimensions_strategy(),
            angle in 0.0f64..=360.0,
        ) {
            let a = compute_rotated_bounds(width, height, angle);
            let b = compute_rotated_bounds(width, height, -angle);
            prop_assert_eq!(a, b);
        }

        /// Property: A full extra turn changes the canvas by at most one
        /// pixel of rounding.
        #[test]
        fn prop_bounds_periodic(
            (width, height) in dimensions_strategy(),
            angle in 0.0f64..=360.0,
        ) {
            let (w1, h1) = compute_rotated_bounds(width, height, angle);
            let (w2, h2) = compute_rotated_bounds(width, height, angle + 360.0);
            prop_assert!((w1 as i64 - w2 as i64).abs() <= 1);
            prop_assert!((h1 as i64 - h2 as i64).abs() <= 1);
        }

        /// Property: The output buffer always matches the advertised
        /// dimensions and channel count.
        #[test]
        fn prop_rotation_buffer_consistent(
            (width, height) in (1u32..=48, 1u32..=48),
            angle in angle_strategy(),
        ) {
            let mask = Mask::zeros(width, height);
            let result = rotate(&mask, angle, ResampleFilter::Bilinear);

            prop_assert_eq!(
                result.pixels.len(),
                (result.width * result.height * result.channels) as usize
            );
        }
    }
}
