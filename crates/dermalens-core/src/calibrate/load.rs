//! Reference photo loading with EXIF orientation handling.
//!
//! Calibration photos come straight from phone cameras, which record
//! the physical sensor data plus an EXIF orientation tag. The loader
//! applies that tag so the detector always sees the photo upright.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbImage};

use super::CalibrateError;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip along top-left to bottom-right diagonal).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip along top-right to bottom-left diagonal).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Read the EXIF orientation tag from encoded photo bytes.
///
/// Returns `Orientation::Normal` if the container carries no EXIF data
/// or the tag cannot be read.
pub fn photo_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply an EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Decode a reference photo from raw file bytes.
///
/// The container format is detected from the bytes (JPEG and PNG are
/// enabled). EXIF orientation is applied before the image is returned,
/// so the result is upright RGB regardless of how the camera was held.
///
/// # Errors
///
/// Returns `CalibrateError::ImageLoad` if the bytes are not a decodable
/// image.
pub fn decode_reference_image(bytes: &[u8]) -> Result<RgbImage, CalibrateError> {
    // Extract EXIF orientation before decoding drops the metadata
    let orientation = photo_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| CalibrateError::ImageLoad(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CalibrateError::ImageLoad(e.to_string()))?;

    if orientation != Orientation::Normal {
        tracing::debug!(?orientation, "normalizing reference photo orientation");
    }
    let oriented = apply_orientation(img, orientation);

    Ok(oriented.into_rgb8())
}

/// Load a reference photo from disk.
///
/// # Errors
///
/// Returns `CalibrateError::Io` if the file cannot be read and
/// `CalibrateError::ImageLoad` if it cannot be decoded.
pub fn load_reference_image(path: impl AsRef<Path>) -> Result<RgbImage, CalibrateError> {
    let bytes = fs::read(path.as_ref()).map_err(|e| CalibrateError::Io(e.to_string()))?;
    decode_reference_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    /// Encode a small RGB gradient as PNG bytes.
    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 40) as u8, (y * 40) as u8, 128])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_valid_png() {
        let bytes = png_fixture(4, 3);
        let img = decode_reference_image(&bytes).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_reference_image(&[0x00, 0x01, 0x02, 0x03]);
        match result {
            Err(CalibrateError::ImageLoad(_)) => {}
            other => panic!("Expected ImageLoad error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_reference_image(&[]).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_reference_image("/nonexistent/reference.jpg");
        match result {
            Err(CalibrateError::Io(_)) => {}
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }

    #[test]
    fn test_orientation_without_exif_is_normal() {
        let bytes = png_fixture(2, 2);
        assert_eq!(photo_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        let rgb_img = RgbImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180_reverses_pixels() {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        let rgb_img = RgbImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::Rotate180).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
