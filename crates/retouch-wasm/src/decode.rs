//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{to_js_error, JsImage};
use wasm_bindgen::prelude::*;

/// Decode PNG, JPEG or GIF bytes to an RGBA image.
///
/// JPEG EXIF orientation is applied, so the returned size is the size the
/// user sees.
///
/// # Errors
///
/// Throws if the format is not recognized or the file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    retouch_core::decode_image(bytes)
        .map(|source| JsImage::from_source(&source))
        .map_err(to_js_error)
}
