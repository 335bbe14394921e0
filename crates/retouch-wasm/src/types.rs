//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use retouch_core::{CompositedOutput, DecodeError, SourceImage};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// Used both for decoded sources and for composited output. The pixel
/// layout matches `ImageData.data` (4 bytes per pixel, row-major), so the
/// shell can blit it straight into a canvas.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage from dimensions and RGBA pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_source(source: &SourceImage) -> Self {
        Self {
            width: source.width(),
            height: source.height(),
            pixels: source.pixels().to_vec(),
        }
    }

    pub(crate) fn from_output(output: &CompositedOutput) -> Self {
        Self {
            width: output.width(),
            height: output.height(),
            pixels: output.pixels().to_vec(),
        }
    }

    /// Convert back to a core SourceImage (clones the pixel data).
    pub(crate) fn to_source(&self) -> Result<SourceImage, DecodeError> {
        SourceImage::from_rgba(self.width, self.height, self.pixels.clone())
    }

    pub(crate) fn raw_pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Convert any displayable error into a JavaScript string value.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
