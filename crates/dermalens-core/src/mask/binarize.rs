//! Foreground binarization.

use super::Mask;

/// Value assigned to foreground pixels by [`binarize`].
pub const FOREGROUND: u8 = 255;

/// Snap every pixel of a mask to background or full foreground.
///
/// Any pixel with at least one non-zero channel becomes [`FOREGROUND`] in
/// all of its channels; all-zero pixels stay zero. The input mask is not
/// modified.
///
/// Interpolating transforms such as rotation leave partial values along
/// region boundaries; this restores a two-valued mask afterwards.
pub fn binarize(mask: &Mask) -> Mask {
    let channels = mask.channels as usize;
    let mut pixels = vec![0u8; mask.pixels.len()];

    for (src, dst) in mask
        .pixels
        .chunks_exact(channels)
        .zip(pixels.chunks_exact_mut(channels))
    {
        if src.iter().any(|&v| v != 0) {
            dst.fill(FOREGROUND);
        }
    }

    Mask::with_channels(mask.width, mask.height, mask.channels, pixels)
}
