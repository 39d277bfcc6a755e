//! Gradient Hough transform for circular reference objects.
//!
//! # Algorithm
//!
//! The detector follows the classic gradient voting scheme:
//!
//! 1. Smooth the grayscale photo with a Gaussian and extract a Canny
//!    edge map plus Sobel gradients.
//! 2. Every edge point votes for possible centers along its gradient
//!    line, in both directions, into an accumulator downscaled by
//!    `accumulator_scale`.
//! 3. Accumulator cells that are local maxima above `vote_threshold`
//!    become center candidates, strongest first.
//! 4. For each candidate the radius is estimated from the distances of
//!    the edge points around it, and candidates closer than the minimum
//!    center distance to an accepted circle are dropped.
//!
//! Voting along the gradient line works for both filled discs and
//! rings, which covers coins photographed against light or dark skin.

use image::{GrayImage, Luma, RgbImage};

use crate::geometry::distance;

use super::{CircleDetectionParams, DetectedCircle};

/// Gradient magnitudes below this carry no usable direction.
const MIN_GRADIENT_MAGNITUDE: f32 = 1e-3;

/// Red weight of the Rec. 601 luma transform.
const LUMA_R: f32 = 0.299;
/// Green weight of the Rec. 601 luma transform.
const LUMA_G: f32 = 0.587;
/// Blue weight of the Rec. 601 luma transform.
const LUMA_B: f32 = 0.114;

/// Convert an RGB photo to 8-bit grayscale with Rec. 601 luma weights.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let luma = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
        Luma([luma.round() as u8])
    })
}

/// An edge point with its unit gradient direction.
#[derive(Debug, Clone, Copy)]
struct EdgePoint {
    x: u32,
    y: u32,
    dx: f32,
    dy: f32,
}

/// A center candidate in accumulator coordinates.
#[derive(Debug, Clone, Copy)]
struct CenterCandidate {
    ax: u32,
    ay: u32,
    votes: u32,
}

/// Detect circles in a grayscale photo.
///
/// Returns the detected circles strongest first, so the first element
/// is the dominant circle of the photo. The list is empty when nothing
/// reached the vote threshold.
///
/// # Arguments
///
/// * `gray` - Grayscale photo to search
/// * `params` - Detector tuning, see [`CircleDetectionParams`]
pub fn detect_circles(gray: &GrayImage, params: &CircleDetectionParams) -> Vec<DetectedCircle> {
    let (width, height) = gray.dimensions();
    if width < 4 || height < 4 {
        return Vec::new();
    }

    let dp = params.accumulator_scale.max(1);
    let min_radius = params.min_radius;
    let max_radius = params.resolved_max_radius(width, height);
    let min_distance = params.resolved_min_distance(height);

    let edge_points = extract_edge_points(gray, params);
    tracing::debug!("{} edge points feed the circle accumulator", edge_points.len());
    if edge_points.is_empty() {
        return Vec::new();
    }

    // Vote accumulation on the downscaled grid
    let accum_w = ((width + dp - 1) / dp) as usize;
    let accum_h = ((height + dp - 1) / dp) as usize;
    let mut accum = vec![0u32; accum_w * accum_h];

    for point in &edge_points {
        // Vote along +gradient and -gradient directions
        for sign in [-1.0f32, 1.0] {
            let mut r = min_radius.max(1) as f32;
            while r <= max_radius as f32 {
                let cx = point.x as f32 + sign * point.dx * r;
                let cy = point.y as f32 + sign * point.dy * r;
                if cx < 0.0 || cy < 0.0 || cx >= width as f32 || cy >= height as f32 {
                    break;
                }
                let idx = (cy as u32 / dp) as usize * accum_w + (cx as u32 / dp) as usize;
                accum[idx] += 1;
                r += dp as f32;
            }
        }
    }

    let mut candidates = find_center_candidates(&accum, accum_w, accum_h, params.vote_threshold);
    // Strongest candidate first; row-major order breaks equal-vote ties
    candidates.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then(a.ay.cmp(&b.ay))
            .then(a.ax.cmp(&b.ax))
    });
    tracing::debug!("{} center candidates above the vote threshold", candidates.len());

    // Refine candidates into circles, enforcing the center separation
    let mut circles: Vec<DetectedCircle> = Vec::new();
    for candidate in &candidates {
        let cx = (candidate.ax as f32 + 0.5) * dp as f32;
        let cy = (candidate.ay as f32 + 0.5) * dp as f32;

        let too_close = circles.iter().any(|c| {
            distance((cy as f64, cx as f64), (c.y as f64, c.x as f64)) < min_distance as f64
        });
        if too_close {
            continue;
        }

        if let Some(radius) = estimate_radius(cx, cy, &edge_points, min_radius, max_radius, dp) {
            circles.push(DetectedCircle {
                x: cx.round() as u32,
                y: cy.round() as u32,
                radius,
            });
        }
    }

    tracing::info!("{} circles detected", circles.len());
    circles
}

/// Extract Canny edge points together with their unit Sobel gradient.
fn extract_edge_points(gray: &GrayImage, params: &CircleDetectionParams) -> Vec<EdgePoint> {
    let (width, height) = gray.dimensions();

    let blurred = if params.blur_kernel > 1 {
        imageproc::filter::gaussian_blur_f32(gray, params.blur_sigma())
    } else {
        gray.clone()
    };

    // The lower hysteresis threshold tracks the upper one at half strength
    let edges = imageproc::edges::canny(
        &blurred,
        params.edge_threshold / 2.0,
        params.edge_threshold,
    );

    // Sobel gradients (i16 output)
    let gx = imageproc::gradients::horizontal_sobel(&blurred);
    let gy = imageproc::gradients::vertical_sobel(&blurred);

    let mut points = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if edges.get_pixel(x, y)[0] == 0 {
                continue;
            }
            let gxv = gx.get_pixel(x, y)[0] as f32;
            let gyv = gy.get_pixel(x, y)[0] as f32;
            let mag = (gxv * gxv + gyv * gyv).sqrt();
            if mag < MIN_GRADIENT_MAGNITUDE {
                continue;
            }
            points.push(EdgePoint {
                x,
                y,
                dx: gxv / mag,
                dy: gyv / mag,
            });
        }
    }
    points
}

/// Scan the accumulator for local maxima at or above `vote_threshold`.
fn find_center_candidates(
    accum: &[u32],
    accum_w: usize,
    accum_h: usize,
    vote_threshold: u32,
) -> Vec<CenterCandidate> {
    let at = |x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= accum_w as i64 || y >= accum_h as i64 {
            return 0;
        }
        accum[y as usize * accum_w + x as usize]
    };

    let mut candidates = Vec::new();
    for y in 0..accum_h as i64 {
        for x in 0..accum_w as i64 {
            let votes = at(x, y);
            if votes < vote_threshold {
                continue;
            }
            // Plateaus resolve toward the top-left cell
            if votes > at(x - 1, y)
                && votes >= at(x + 1, y)
                && votes > at(x, y - 1)
                && votes >= at(x, y + 1)
            {
                candidates.push(CenterCandidate {
                    ax: x as u32,
                    ay: y as u32,
                    votes,
                });
            }
        }
    }
    candidates
}

/// Estimate the radius of a circle centered at `(cx, cy)` from the edge
/// points around it.
///
/// Distances are binned at the accumulator resolution and each bin is
/// scored by its count divided by its radius, so a large circle does not
/// win just by having proportionally more edge pixels on its perimeter.
/// Returns `None` when no edge point supports any radius in range.
fn estimate_radius(
    cx: f32,
    cy: f32,
    edge_points: &[EdgePoint],
    min_radius: u32,
    max_radius: u32,
    dp: u32,
) -> Option<u32> {
    let bin = dp.max(1) as f32;
    let n_bins = (max_radius / dp.max(1) + 2) as usize;
    let mut counts = vec![0u32; n_bins];

    for point in edge_points {
        let d = distance((cy as f64, cx as f64), (point.y as f64, point.x as f64)) as f32;
        if d < min_radius as f32 || d > max_radius as f32 {
            continue;
        }
        let b = (d / bin).round() as usize;
        if b < n_bins {
            counts[b] += 1;
        }
    }

    let mut best_bin = 0usize;
    let mut best_score = 0.0f32;
    for (b, &count) in counts.iter().enumerate().skip(1) {
        if count == 0 {
            continue;
        }
        let score = count as f32 / (b as f32 * bin);
        if score > best_score {
            best_score = score;
            best_bin = b;
        }
    }

    if best_bin == 0 {
        return None;
    }
    Some((best_bin as f32 * bin).round() as u32)
}
