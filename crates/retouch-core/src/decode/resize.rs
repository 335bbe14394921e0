//! Scaling a source image onto the output canvas.
//!
//! The source always fills the target exactly. When the target aspect ratio
//! differs from the source, the scale is non-uniform and the image stretches.

use image::RgbaImage;

use super::{FilterType, SourceImage};

/// Resize a source image to exact dimensions.
///
/// Zero dimensions are raised to 1. When the target equals the natural
/// size the pixels are copied without resampling, so a 1:1 composition is
/// pixel-exact.
///
/// # Arguments
///
/// * `source` - The image to scale
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
pub fn resize_to_canvas(
    source: &SourceImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> RgbaImage {
    let (width, height) = (width.max(1), height.max(1));

    // Fast path: if dimensions match, just clone
    if source.dimensions() == (width, height) {
        return source.as_rgba_image().clone();
    }

    image::imageops::resize(
        source.as_rgba_image(),
        width,
        height,
        filter.to_image_filter(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn create_test_image(width: u32, height: u32) -> SourceImage {
        // Simple gradient for testing
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
                255,
            ])
        });
        SourceImage::from_rgba_image(img).unwrap()
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize_to_canvas(&img, 50, 25, FilterType::Bilinear);
        assert_eq!(resized.dimensions(), (50, 25));
        assert_eq!(resized.as_raw().len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions_is_exact() {
        let img = create_test_image(100, 50);
        let resized = resize_to_canvas(&img, 100, 50, FilterType::Lanczos3);
        assert_eq!(resized.as_raw(), img.as_rgba_image().as_raw());
    }

    #[test]
    fn test_resize_non_uniform_stretch() {
        let img = create_test_image(100, 100);
        let resized = resize_to_canvas(&img, 300, 20, FilterType::Bilinear);
        assert_eq!(resized.dimensions(), (300, 20));
    }

    #[test]
    fn test_resize_zero_dimension_raised_to_one() {
        let img = create_test_image(10, 10);
        let resized = resize_to_canvas(&img, 0, 5, FilterType::Nearest);
        assert_eq!(resized.dimensions(), (1, 5));
    }

    #[test]
    fn test_resize_uniform_color_stays_uniform() {
        let img = SourceImage::solid(7, 3, [40, 80, 120, 255]).unwrap();
        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize_to_canvas(&img, 20, 11, filter);
            assert!(
                resized.pixels().all(|p| p.0 == [40, 80, 120, 255]),
                "{filter:?} changed a uniform color"
            );
        }
    }
}
