//! Image export WASM bindings.
//!
//! ```typescript
//! import { encode_png, default_export_filename } from '@retouch/wasm';
//!
//! const png = encode_png(output);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! link.download = default_export_filename();
//! ```

use crate::types::{to_js_error, JsImage};
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an RGBA image (usually a composited output) as PNG bytes.
///
/// # Errors
///
/// Throws if the pixel buffer does not match the dimensions.
#[wasm_bindgen]
pub fn encode_png(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_rgba_png(image.raw_pixels(), image.width(), image.height())
        .map_err(to_js_error)
}

/// Encode raw RGBA pixel data as PNG bytes.
#[wasm_bindgen]
pub fn encode_rgba_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_rgba_png(pixels, width, height).map_err(to_js_error)
}

/// File name suggested for downloads
#[wasm_bindgen]
pub fn default_export_filename() -> String {
    encode::DEFAULT_EXPORT_FILENAME.to_string()
}
