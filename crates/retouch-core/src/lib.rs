//! Retouch Core - Image composition library
//!
//! This crate provides the core functionality for Retouch: decoding an
//! uploaded image, resizing it with an optional aspect lock, applying
//! brightness/contrast/grayscale/sepia filters, stamping a text overlay and
//! exporting the result as PNG.

pub mod compose;
pub mod decode;
pub mod encode;
pub mod filters;
pub mod geometry;
pub mod overlay;
pub mod session;

pub use compose::{compose, compose_with, ComposeOptions, CompositedOutput};
pub use decode::{decode_image, DecodeError, SourceImage};
pub use encode::{encode_png, EncodeError, DEFAULT_EXPORT_FILENAME};
pub use filters::{apply_filters, ColorMatrix};
pub use geometry::{parse_dimension, GeometryError, GeometryState};
pub use overlay::{ColorParseError, Rgb, TextOverlayState};
pub use session::{EditorSession, LoadOutcome, LoadTicket, SessionError};

/// Brightness range in percent (100 = identity)
pub const BRIGHTNESS_RANGE: (f32, f32) = (0.0, 200.0);
/// Contrast range in percent (100 = identity)
pub const CONTRAST_RANGE: (f32, f32) = (0.0, 200.0);
/// Grayscale range in percent (0 = identity)
pub const GRAYSCALE_RANGE: (f32, f32) = (0.0, 100.0);
/// Sepia range in percent (0 = identity)
pub const SEPIA_RANGE: (f32, f32) = (0.0, 100.0);

/// Filter intensities applied to the image pass of a composition
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Brightness (0 to 200 percent)
    pub brightness: f32,
    /// Contrast (0 to 200 percent)
    pub contrast: f32,
    /// Grayscale (0 to 100 percent)
    pub grayscale: f32,
    /// Sepia (0 to 100 percent)
    pub sepia: f32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            grayscale: 0.0,
            sepia: 0.0,
        }
    }
}

impl FilterState {
    /// Create a new FilterState at the identity point
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every filter is at its identity value
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Restore the identity values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Return a copy with every value forced into its declared range.
    ///
    /// NaN collapses to the identity value of that filter.
    pub fn clamped(&self) -> Self {
        let identity = Self::default();
        Self {
            brightness: clamp_or(self.brightness, BRIGHTNESS_RANGE, identity.brightness),
            contrast: clamp_or(self.contrast, CONTRAST_RANGE, identity.contrast),
            grayscale: clamp_or(self.grayscale, GRAYSCALE_RANGE, identity.grayscale),
            sepia: clamp_or(self.sepia, SEPIA_RANGE, identity.sepia),
        }
    }

    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = clamp_or(value, BRIGHTNESS_RANGE, 100.0);
    }

    pub fn set_contrast(&mut self, value: f32) {
        self.contrast = clamp_or(value, CONTRAST_RANGE, 100.0);
    }

    pub fn set_grayscale(&mut self, value: f32) {
        self.grayscale = clamp_or(value, GRAYSCALE_RANGE, 0.0);
    }

    pub fn set_sepia(&mut self, value: f32) {
        self.sepia = clamp_or(value, SEPIA_RANGE, 0.0);
    }
}

#[inline]
fn clamp_or(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
