//! Color filter pipeline
//!
//! Applies the four image filters to RGBA pixel data as a single combined
//! color matrix.
//!
//! ## Filter Order
//! 1. Brightness
//! 2. Contrast
//! 3. Grayscale
//! 4. Sepia
//!
//! Every filter is an affine transform over normalized RGB (the CSS Filter
//! Effects matrices), so the four collapse into one [`ColorMatrix`] that is
//! evaluated once per pixel. Values are clamped only after the combined
//! transform. Alpha is never touched.

use crate::FilterState;

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Fully toned sepia matrix (rows produce R, G, B).
const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Affine color transform over normalized RGB.
///
/// Each row computes one output channel: `out = m[0]*r + m[1]*g + m[2]*b + m[3]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    rows: [[f32; 4]; 3],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMatrix {
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// Linear scale of every channel by `percent / 100`.
    pub fn brightness(percent: f32) -> Self {
        let k = percent / 100.0;
        Self {
            rows: [
                [k, 0.0, 0.0, 0.0],
                [0.0, k, 0.0, 0.0],
                [0.0, 0.0, k, 0.0],
            ],
        }
    }

    /// Linear scale around mid-gray by `percent / 100`.
    pub fn contrast(percent: f32) -> Self {
        let k = percent / 100.0;
        let offset = 0.5 - 0.5 * k;
        Self {
            rows: [
                [k, 0.0, 0.0, offset],
                [0.0, k, 0.0, offset],
                [0.0, 0.0, k, offset],
            ],
        }
    }

    /// Interpolation toward luminance-only color by `percent / 100`.
    pub fn grayscale(percent: f32) -> Self {
        let keep = 1.0 - (percent / 100.0).clamp(0.0, 1.0);
        let lum = [LUMINANCE_R, LUMINANCE_G, LUMINANCE_B];
        let mut rows = [[0.0; 4]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().take(3).enumerate() {
                let target = if i == j { 1.0 } else { 0.0 };
                *cell = lum[j] + (target - lum[j]) * keep;
            }
        }
        Self { rows }
    }

    /// Interpolation toward the sepia tone matrix by `percent / 100`.
    pub fn sepia(percent: f32) -> Self {
        let keep = 1.0 - (percent / 100.0).clamp(0.0, 1.0);
        let mut rows = [[0.0; 4]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().take(3).enumerate() {
                let target = if i == j { 1.0 } else { 0.0 };
                *cell = SEPIA[i][j] + (target - SEPIA[i][j]) * keep;
            }
        }
        Self { rows }
    }

    /// Build the combined transform for a filter state.
    ///
    /// Filters sitting at their identity value contribute nothing, so an
    /// identity state yields exactly [`ColorMatrix::identity`].
    pub fn from_filters(filters: &FilterState) -> Self {
        let filters = filters.clamped();
        let mut matrix = Self::identity();
        if filters.brightness != 100.0 {
            matrix = matrix.then(&Self::brightness(filters.brightness));
        }
        if filters.contrast != 100.0 {
            matrix = matrix.then(&Self::contrast(filters.contrast));
        }
        if filters.grayscale != 0.0 {
            matrix = matrix.then(&Self::grayscale(filters.grayscale));
        }
        if filters.sepia != 0.0 {
            matrix = matrix.then(&Self::sepia(filters.sepia));
        }
        matrix
    }

    /// Compose so that `self` is applied first and `next` second.
    pub fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        let mut rows = [[0.0; 4]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += next.rows[i][k] * self.rows[k][j];
                }
                if j == 3 {
                    sum += next.rows[i][3];
                }
                *cell = sum;
            }
        }
        ColorMatrix { rows }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Transform one 8-bit RGB triple.
    #[inline]
    pub fn apply_rgb(&self, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
        let r = r as f32 / 255.0;
        let g = g as f32 / 255.0;
        let b = b as f32 / 255.0;
        let channel = |row: &[f32; 4]| -> u8 {
            let v = row[0] * r + row[1] * g + row[2] * b + row[3];
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        (
            channel(&self.rows[0]),
            channel(&self.rows[1]),
            channel(&self.rows[2]),
        )
    }
}

/// Apply the filter state to RGBA pixel data in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `filters` - The filter values to apply
pub fn apply_filters(pixels: &mut [u8], filters: &FilterState) {
    let matrix = ColorMatrix::from_filters(filters);
    apply_matrix(pixels, &matrix);
}

/// Apply a precomputed color matrix to RGBA pixel data in place.
pub fn apply_matrix(pixels: &mut [u8], matrix: &ColorMatrix) {
    // Early exit if nothing to do
    if matrix.is_identity() {
        return;
    }

    for chunk in pixels.chunks_exact_mut(4) {
        let (r, g, b) = matrix.apply_rgb(chunk[0], chunk[1], chunk[2]);
        chunk[0] = r;
        chunk[1] = g;
        chunk[2] = b;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rgba_strategy() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), 0..64).prop_map(|mut v| {
            v.truncate(v.len() / 4 * 4);
            v
        })
    }

    proptest! {
        /// Property: full grayscale yields equal channels whatever came before it.
        #[test]
        fn prop_full_grayscale_equal_channels(
            pixels in rgba_strategy(),
            brightness in 0.0f32..=200.0,
            contrast in 0.0f32..=200.0,
        ) {
            let filters = FilterState { brightness, contrast, grayscale: 100.0, sepia: 0.0 };
            let mut out = pixels.clone();
            apply_filters(&mut out, &filters);
            for chunk in out.chunks_exact(4) {
                prop_assert_eq!(chunk[0], chunk[1]);
                prop_assert_eq!(chunk[1], chunk[2]);
            }
        }

        /// Property: filters preserve buffer length and alpha.
        #[test]
        fn prop_length_and_alpha_preserved(
            pixels in rgba_strategy(),
            brightness in 0.0f32..=200.0,
            contrast in 0.0f32..=200.0,
            grayscale in 0.0f32..=100.0,
            sepia in 0.0f32..=100.0,
        ) {
            let filters = FilterState { brightness, contrast, grayscale, sepia };
            let mut out = pixels.clone();
            apply_filters(&mut out, &filters);
            prop_assert_eq!(out.len(), pixels.len());
            for (a, b) in out.chunks_exact(4).zip(pixels.chunks_exact(4)) {
                prop_assert_eq!(a[3], b[3]);
            }
        }
    }
}
