//! Overlay detected circles on the reference photo.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};

use super::DetectedCircle;

/// Outline color of a detected circle.
const OUTLINE: Rgb<u8> = Rgb([0, 255, 0]);
/// Color of the center dot.
const CENTER_DOT: Rgb<u8> = Rgb([255, 0, 0]);

/// Draw each detected circle onto the photo.
///
/// The perimeter gets a green outline two pixels wide and the center a
/// small red dot. Circles that extend past the photo edge are clipped.
pub fn annotate_circles(image: &mut RgbImage, circles: &[DetectedCircle]) {
    for circle in circles {
        let center = (circle.x as i32, circle.y as i32);
        let radius = circle.radius as i32;
        // A second ring one pixel in keeps the outline visible on
        // high-resolution photos
        draw_hollow_circle_mut(image, center, radius, OUTLINE);
        draw_hollow_circle_mut(image, center, (radius - 1).max(1), OUTLINE);
        draw_filled_circle_mut(image, center, 2, CENTER_DOT);
    }
}
