//! Image processor - dimension probing and decoding

use crate::error::{ProcessingError, ProcessingResult};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use thumbdrop_core::models::ImageMetadata;

/// Read width and height from the image header without decoding pixels.
pub fn probe(data: &[u8]) -> ProcessingResult<ImageMetadata> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    if reader.format().is_none() {
        return Err(ProcessingError::Decode("unrecognized image format".to_string()));
    }

    let (width_px, height_px) = reader
        .into_dimensions()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    Ok(ImageMetadata {
        width_px,
        height_px,
    })
}

/// Decode the full image, returning it with its detected format.
pub fn decode(data: &[u8]) -> ProcessingResult<(DynamicImage, ImageFormat)> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    let format = reader
        .format()
        .ok_or_else(|| ProcessingError::Decode("unrecognized image format".to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;

    Ok((img, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), format)
            .unwrap();
        buffer
    }

    #[test]
    fn test_probe_png() {
        let meta = probe(&encoded(300, 150, ImageFormat::Png)).unwrap();
        assert_eq!(meta.width_px, 300);
        assert_eq!(meta.height_px, 150);
    }

    #[test]
    fn test_probe_jpeg() {
        let meta = probe(&encoded(256, 256, ImageFormat::Jpeg)).unwrap();
        assert_eq!((meta.width_px, meta.height_px), (256, 256));
    }

    #[test]
    fn test_probe_rejects_non_image() {
        assert!(matches!(
            probe(b"PK\x03\x04 definitely not an image"),
            Err(ProcessingError::Decode(_))
        ));
        assert!(matches!(probe(&[]), Err(ProcessingError::Decode(_))));
    }

    #[test]
    fn test_decode_reports_format() {
        let (img, format) = decode(&encoded(10, 20, ImageFormat::Png)).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!((img.width(), img.height()), (10, 20));
    }
}
