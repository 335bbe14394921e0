//! Stateless composition binding.
//!
//! Most shells should drive an [`crate::Editor`] instead; this function is
//! for callers that keep their own state and just need pixels.

use crate::filters::JsFilterState;
use crate::geometry::JsGeometry;
use crate::overlay::JsTextOverlay;
use crate::types::{to_js_error, JsImage};
use retouch_core::decode::FilterType;
use retouch_core::ComposeOptions;
use wasm_bindgen::prelude::*;

/// Compose `source` into a new output image.
///
/// # Arguments
///
/// * `source` - Decoded source image
/// * `geometry` - Target size
/// * `filters` - Filter intensities
/// * `overlay` - Text overlay
/// * `resample` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn compose(
    source: &JsImage,
    geometry: &JsGeometry,
    filters: &JsFilterState,
    overlay: &JsTextOverlay,
    resample: u8,
) -> Result<JsImage, JsValue> {
    let source = source.to_source().map_err(to_js_error)?;
    let options = ComposeOptions {
        resample: FilterType::from(resample),
    };
    let output = retouch_core::compose_with(
        &source,
        geometry.inner(),
        filters.inner(),
        overlay.inner(),
        &options,
    );
    Ok(JsImage::from_output(&output))
}
