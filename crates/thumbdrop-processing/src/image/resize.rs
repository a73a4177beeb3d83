use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Target size for a resize to `target_width`, keeping the aspect ratio.
    pub fn dimensions_for_width(orig_width: u32, orig_height: u32, target_width: u32) -> (u32, u32) {
        let aspect_ratio = orig_height as f64 / orig_width.max(1) as f64;
        let height = (target_width as f64 * aspect_ratio).round() as u32;
        (target_width.max(1), height.max(1))
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Resize to `target_width` pixels wide, height following the aspect ratio.
    pub fn resize_to_width(img: &DynamicImage, target_width: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::dimensions_for_width(orig_width, orig_height, target_width);
        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_dimensions_for_width() {
        assert_eq!(ImageResize::dimensions_for_width(256, 256, 32), (32, 32));
        assert_eq!(ImageResize::dimensions_for_width(400, 200, 64), (64, 32));
        assert_eq!(ImageResize::dimensions_for_width(200, 300, 32), (32, 48));
    }

    #[test]
    fn test_dimensions_never_collapse_to_zero() {
        assert_eq!(ImageResize::dimensions_for_width(5000, 128, 32), (32, 1));
    }

    #[test]
    fn test_select_filter() {
        assert_eq!(ImageResize::select_filter(256, 256, 32, 32), FilterType::Triangle);
        assert_eq!(ImageResize::select_filter(100, 100, 60, 60), FilterType::CatmullRom);
        assert_eq!(ImageResize::select_filter(100, 100, 90, 90), FilterType::Lanczos3);
    }

    #[test]
    fn test_resize_to_width() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(300, 150));
        let resized = ImageResize::resize_to_width(&img, 64);
        assert_eq!(resized.dimensions(), (64, 32));
    }
}
