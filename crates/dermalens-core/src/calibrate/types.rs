//! Core types for reference object calibration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical diameter in millimeters of the ISL1 reference coin.
///
/// Calibration photos include this coin next to the lesion; its known
/// size anchors the pixel-to-millimeter scale.
pub const ISL1_DIAMETER_MM: f64 = 18.0;

/// Error types for reference photo calibration.
#[derive(Debug, Error)]
pub enum CalibrateError {
    /// I/O error while reading the reference photo.
    #[error("Failed to read reference photo: {0}")]
    Io(String),

    /// The reference photo could not be decoded.
    #[error("Failed to decode reference photo: {0}")]
    ImageLoad(String),

    /// No circular reference object was found in the photo.
    #[error("No circular reference object detected")]
    NoCircleDetected,
}

/// A circle found by the Hough detector.
///
/// Coordinates and radius are quantized to whole pixels by rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedCircle {
    /// Center column.
    pub x: u32,
    /// Center row.
    pub y: u32,
    /// Radius in pixels.
    pub radius: u32,
}

impl DetectedCircle {
    /// Center of the circle as a `(y, x)` point.
    pub fn center(&self) -> (f64, f64) {
        (self.y as f64, self.x as f64)
    }

    /// Diameter in pixels.
    pub fn diameter(&self) -> u32 {
        self.radius * 2
    }
}

/// Tuning parameters for the gradient Hough circle detector.
///
/// The defaults are the values the calibration pipeline is tuned with
/// for coin photos; override individual fields for other material.
///
/// # Example
///
/// ```
/// use dermalens_core::calibrate::CircleDetectionParams;
///
/// let params = CircleDetectionParams {
///     vote_threshold: 50,
///     ..Default::default()
/// };
/// assert_eq!(params.accumulator_scale, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleDetectionParams {
    /// Side length of the square Gaussian smoothing kernel applied
    /// before edge extraction. `0` or `1` disables smoothing.
    pub blur_kernel: u32,
    /// Downscale factor of the voting accumulator relative to the image.
    /// Larger values are faster and more noise tolerant but quantize the
    /// detected centers more coarsely.
    pub accumulator_scale: u32,
    /// Minimum distance in pixels between two detected centers.
    /// `None` uses the image height, which keeps a single dominant
    /// circle per photo.
    pub min_center_distance: Option<u32>,
    /// Upper threshold of the Canny edge extractor; the lower threshold
    /// is half of it.
    pub edge_threshold: f32,
    /// Minimum number of accumulator votes for a center candidate.
    pub vote_threshold: u32,
    /// Smallest radius searched, in pixels.
    pub min_radius: u32,
    /// Largest radius searched, in pixels. `0` means the larger image
    /// dimension.
    pub max_radius: u32,
}

impl Default for CircleDetectionParams {
    fn default() -> Self {
        Self {
            blur_kernel: 15,
            accumulator_scale: 2,
            min_center_distance: None,
            edge_threshold: 50.0,
            vote_threshold: 30,
            min_radius: 0,
            max_radius: 0,
        }
    }
}

impl CircleDetectionParams {
    /// Create detector parameters with the default coin-photo tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard deviation of the smoothing Gaussian, derived from the
    /// kernel size as `0.3 * ((k - 1) / 2 - 1) + 0.8`.
    pub fn blur_sigma(&self) -> f32 {
        if self.blur_kernel <= 1 {
            return 0.0;
        }
        0.3 * ((self.blur_kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// The center separation to enforce for an image of this height.
    pub fn resolved_min_distance(&self, image_height: u32) -> u32 {
        self.min_center_distance.unwrap_or(image_height)
    }

    /// The largest radius to search for an image of these dimensions.
    pub fn resolved_max_radius(&self, width: u32, height: u32) -> u32 {
        if self.max_radius == 0 {
            width.max(height)
        } else {
            self.max_radius
        }
    }
}

/// Conversion factor between pixel and millimeter measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelScale {
    /// How many pixels cover one millimeter.
    pub pixels_per_mm: f64,
}

impl PixelScale {
    /// Derive the scale from a detected reference circle of known
    /// physical diameter.
    pub fn from_circle(circle: &DetectedCircle, diameter_mm: f64) -> Self {
        debug_assert!(diameter_mm > 0.0, "Reference diameter must be positive");
        Self {
            pixels_per_mm: circle.diameter() as f64 / diameter_mm,
        }
    }

    /// Convert a pixel measurement to millimeters.
    pub fn to_millimeters(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_mm
    }

    /// Convert a millimeter measurement to pixels.
    pub fn to_pixels(&self, millimeters: f64) -> f64 {
        millimeters * self.pixels_per_mm
    }
}

/// A recognized reference object together with its physical size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceMeasurement {
    /// The detected reference circle, in image pixels.
    pub circle: DetectedCircle,
    /// Known physical diameter of the reference object.
    pub diameter_mm: f64,
    /// Scale derived from the circle and the physical diameter.
    pub scale: PixelScale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_pipeline_tuning() {
        let params = CircleDetectionParams::default();
        assert_eq!(params.blur_kernel, 15);
        assert_eq!(params.accumulator_scale, 2);
        assert_eq!(params.min_center_distance, None);
        assert_eq!(params.edge_threshold, 50.0);
        assert_eq!(params.vote_threshold, 30);
        assert_eq!(params.min_radius, 0);
        assert_eq!(params.max_radius, 0);
    }

    #[test]
    fn test_blur_sigma_for_default_kernel() {
        let params = CircleDetectionParams::default();
        assert!((params.blur_sigma() - 2.6).abs() < 1e-6);
    }

    #[test]
    fn test_blur_sigma_disabled_for_tiny_kernels() {
        let mut params = CircleDetectionParams::default();
        params.blur_kernel = 0;
        assert_eq!(params.blur_sigma(), 0.0);
        params.blur_kernel = 1;
        assert_eq!(params.blur_sigma(), 0.0);
    }

    #[test]
    fn test_resolved_min_distance_defaults_to_height() {
        let params = CircleDetectionParams::default();
        assert_eq!(params.resolved_min_distance(480), 480);

        let explicit = CircleDetectionParams {
            min_center_distance: Some(25),
            ..Default::default()
        };
        assert_eq!(explicit.resolved_min_distance(480), 25);
    }

    #[test]
    fn test_resolved_max_radius_auto_uses_larger_dimension() {
        let params = CircleDetectionParams::default();
        assert_eq!(params.resolved_max_radius(640, 480), 640);
        assert_eq!(params.resolved_max_radius(480, 640), 640);

        let explicit = CircleDetectionParams {
            max_radius: 100,
            ..Default::default()
        };
        assert_eq!(explicit.resolved_max_radius(640, 480), 100);
    }

    #[test]
    fn test_pixel_scale_round_trip() {
        let circle = DetectedCircle {
            x: 120,
            y: 90,
            radius: 36,
        };
        let scale = PixelScale::from_circle(&circle, ISL1_DIAMETER_MM);

        // 72 px across 18 mm is 4 px per mm
        assert!((scale.pixels_per_mm - 4.0).abs() < 1e-9);
        assert!((scale.to_millimeters(72.0) - 18.0).abs() < 1e-9);
        assert!((scale.to_pixels(9.0) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_detected_circle_helpers() {
        let circle = DetectedCircle {
            x: 10,
            y: 20,
            radius: 7,
        };
        assert_eq!(circle.center(), (20.0, 10.0));
        assert_eq!(circle.diameter(), 14);
    }

    #[test]
    fn test_calibrate_error_display() {
        let err = CalibrateError::NoCircleDetected;
        assert_eq!(err.to_string(), "No circular reference object detected");

        let err = CalibrateError::ImageLoad("bad header".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to decode reference photo: bad header"
        );
    }
}
