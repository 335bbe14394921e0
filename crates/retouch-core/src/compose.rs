//! The compositor: source + geometry + filters + overlay -> output pixels.
//!
//! # Pass Order
//!
//! 1. Allocate the canvas at the target size and draw the source scaled to
//!    fill it exactly
//! 2. Apply the combined filter matrix to the canvas
//! 3. Draw the text overlay, if visible and non-empty
//!
//! The overlay pass runs after filtering, so text pixels always carry the
//! raw fill color. Composition is pure: the same inputs give byte-identical
//! output, and each call owns the buffer it returns.

use image::RgbaImage;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::decode::{resize_to_canvas, FilterType, SourceImage};
use crate::filters::{apply_matrix, ColorMatrix};
use crate::geometry::GeometryState;
use crate::overlay::{draw_text, TextOverlayState};
use crate::FilterState;

/// Knobs that affect how, not what, gets composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    /// Resampling used when the target size differs from the natural size
    pub resample: FilterType,
}

/// The finished RGBA buffer of one composition.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositedOutput {
    image: RgbaImage,
}

impl CompositedOutput {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// RGBA pixel data (4 bytes per pixel, row-major order).
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.image.into_raw()
    }
}

/// Compose with default options (bilinear resampling).
pub fn compose(
    source: &SourceImage,
    geometry: &GeometryState,
    filters: &FilterState,
    overlay: &TextOverlayState,
) -> CompositedOutput {
    compose_with(source, geometry, filters, overlay, &ComposeOptions::default())
}

/// Compose the final image.
///
/// # Arguments
///
/// * `source` - Decoded source image
/// * `geometry` - Output size; the source is stretched to fill it
/// * `filters` - Filter state for the image pass
/// * `overlay` - Text drawn on top, unfiltered
/// * `options` - Resampling choice
///
/// # Returns
///
/// A `CompositedOutput` of exactly `geometry.target_width` x
/// `geometry.target_height` pixels.
pub fn compose_with(
    source: &SourceImage,
    geometry: &GeometryState,
    filters: &FilterState,
    overlay: &TextOverlayState,
    options: &ComposeOptions,
) -> CompositedOutput {
    let (width, height) = geometry.dimensions();

    let mut canvas = resize_to_canvas(source, width, height, options.resample);

    let matrix = ColorMatrix::from_filters(filters);
    apply_matrix(&mut canvas, &matrix);

    let painted = draw_text(&mut canvas, overlay);

    debug!(
        "composed {}x{} -> {}x{} (filters: {}, overlay pixels: {})",
        source.width(),
        source.height(),
        canvas.width(),
        canvas.height(),
        if matrix.is_identity() { "none" } else { "applied" },
        painted
    );

    CompositedOutput { image: canvas }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::overlay::Rgb;
    use proptest::prelude::*;

    fn filters_strategy() -> impl Strategy<Value = FilterState> {
        (0.0f32..=200.0, 0.0f32..=200.0, 0.0f32..=100.0, 0.0f32..=100.0).prop_map(
            |(brightness, contrast, grayscale, sepia)| FilterState {
                brightness,
                contrast,
                grayscale,
                sepia,
            },
        )
    }

    proptest! {
        /// Property: the output is always exactly the requested size.
        #[test]
        fn prop_output_matches_geometry(
            (sw, sh) in (1u32..=24, 1u32..=24),
            (tw, th) in (1u32..=48, 1u32..=48),
            filters in filters_strategy(),
        ) {
            let source = SourceImage::solid(sw, sh, [10, 200, 90, 255]).unwrap();
            let geo = GeometryState {
                target_width: tw,
                target_height: th,
                aspect_lock: false,
                natural_aspect_ratio: sw as f64 / sh as f64,
            };
            let out = compose(&source, &geo, &filters, &TextOverlayState::default());
            prop_assert_eq!(out.dimensions(), (tw, th));
            prop_assert_eq!(out.pixels().len(), (tw * th * 4) as usize);
        }

        /// Property: text pixels never depend on the filter state.
        #[test]
        fn prop_overlay_isolated_from_filters(
            filters in filters_strategy(),
            (r, g, b) in (any::<u8>(), any::<u8>(), any::<u8>()),
        ) {
            let source = SourceImage::solid(64, 32, [120, 60, 30, 255]).unwrap();
            let geo = GeometryState {
                target_width: 64,
                target_height: 32,
                aspect_lock: false,
                natural_aspect_ratio: 2.0,
            };
            let overlay = TextOverlayState {
                text: "X".to_string(),
                font_size: 24,
                color: Rgb::new(r, g, b),
                x: 4,
                y: 4,
                visible: true,
            };

            let mut bare = RgbaImage::new(64, 32);
            draw_text(&mut bare, &overlay);

            let out = compose(&source, &geo, &filters, &overlay);
            for (x, y, p) in bare.enumerate_pixels() {
                if p.0[3] == 255 {
                    prop_assert_eq!(out.pixel(x, y), [r, g, b, 255]);
                }
            }
        }
    }
}
