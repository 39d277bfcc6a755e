//! Reference object recognition.
//!
//! A calibration photo shows the ISL1 coin next to the lesion. Finding
//! the coin and pairing it with its known 18 mm diameter yields the
//! pixel scale that converts lesion measurements to millimeters.

use std::path::Path;

use image::RgbImage;

use super::{
    detect_circles, load_reference_image, to_grayscale, CalibrateError, CircleDetectionParams,
    PixelScale, ReferenceMeasurement, ISL1_DIAMETER_MM,
};

/// Recognize the reference object in a decoded photo.
///
/// The photo is converted to grayscale and searched for circles; the
/// strongest detection is taken as the reference object, and its known
/// physical diameter anchors the pixel scale.
///
/// # Arguments
///
/// * `image` - Upright RGB photo of the reference object
/// * `params` - Circle detector tuning
/// * `diameter_mm` - Physical diameter of the object, usually
///   [`ISL1_DIAMETER_MM`]
///
/// # Errors
///
/// Returns `CalibrateError::NoCircleDetected` when no circle passes the
/// vote threshold.
pub fn recognize_reference(
    image: &RgbImage,
    params: &CircleDetectionParams,
    diameter_mm: f64,
) -> Result<ReferenceMeasurement, CalibrateError> {
    let gray = to_grayscale(image);
    let circles = detect_circles(&gray, params);
    let circle = circles
        .first()
        .copied()
        .ok_or(CalibrateError::NoCircleDetected)?;

    let scale = PixelScale::from_circle(&circle, diameter_mm);
    tracing::info!(
        "reference circle at ({}, {}) with radius {} px sets {:.2} px/mm",
        circle.x,
        circle.y,
        circle.radius,
        scale.pixels_per_mm
    );

    Ok(ReferenceMeasurement {
        circle,
        diameter_mm,
        scale,
    })
}

/// Recognize the ISL1 coin in a photo stored on disk.
///
/// Reads and orients the photo, then delegates to
/// [`recognize_reference`] with the coin's 18 mm diameter.
///
/// # Errors
///
/// Returns `CalibrateError::Io` if the file cannot be read,
/// `CalibrateError::ImageLoad` if it cannot be decoded, and
/// `CalibrateError::NoCircleDetected` if no coin is found.
pub fn recognize_reference_file(
    path: impl AsRef<Path>,
    params: &CircleDetectionParams,
) -> Result<ReferenceMeasurement, CalibrateError> {
    let image = load_reference_image(path)?;
    recognize_reference(&image, params, ISL1_DIAMETER_MM)
}
