//! Output size WASM bindings.
//!
//! `JsGeometry` is immutable from the JavaScript side: every edit returns a
//! new object, mirroring the transition functions in the core crate.
//!
//! ```typescript
//! let geometry = JsGeometry.for_source(1000, 500);
//! geometry = geometry.on_width_changed(500);
//! console.log(geometry.target_height); // 250
//! ```

use crate::types::to_js_error;
use retouch_core::GeometryState;
use wasm_bindgen::prelude::*;

/// Target size plus aspect lock, for JavaScript
#[wasm_bindgen]
#[derive(Clone, Copy, Default)]
pub struct JsGeometry {
    inner: GeometryState,
}

#[wasm_bindgen]
impl JsGeometry {
    /// 800x600, locked, ratio 1
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locked geometry at the natural size of a freshly loaded image.
    pub fn for_source(natural_width: u32, natural_height: u32) -> JsGeometry {
        Self {
            inner: GeometryState::default().for_source(natural_width, natural_height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn target_width(&self) -> u32 {
        self.inner.target_width
    }

    #[wasm_bindgen(getter)]
    pub fn target_height(&self) -> u32 {
        self.inner.target_height
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_lock(&self) -> bool {
        self.inner.aspect_lock
    }

    #[wasm_bindgen(getter)]
    pub fn natural_aspect_ratio(&self) -> f64 {
        self.inner.natural_aspect_ratio
    }

    pub fn on_width_changed(&self, width: u32) -> JsGeometry {
        Self {
            inner: self.inner.on_width_changed(width),
        }
    }

    pub fn on_height_changed(&self, height: u32) -> JsGeometry {
        Self {
            inner: self.inner.on_height_changed(height),
        }
    }

    pub fn with_aspect_lock(&self, aspect_lock: bool) -> JsGeometry {
        Self {
            inner: self.inner.with_aspect_lock(aspect_lock),
        }
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain JS object; missing fields take defaults.
    ///
    /// Dimensions are clamped into range. Throws for a ratio that is not a
    /// positive finite number.
    pub fn from_json(value: JsValue) -> Result<JsGeometry, JsValue> {
        let inner: GeometryState = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        let inner = inner.validated().map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl JsGeometry {
    pub(crate) fn inner(&self) -> &GeometryState {
        &self.inner
    }

    pub(crate) fn from_inner(inner: GeometryState) -> Self {
        Self { inner }
    }
}

/// Validate a dimension typed into a text box.
///
/// Throws for empty, non-integer, zero or negative input. Large values are
/// clamped to the maximum supported dimension.
#[wasm_bindgen]
pub fn parse_dimension(input: &str) -> Result<u32, JsValue> {
    retouch_core::parse_dimension(input).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_edits() {
        let geometry = JsGeometry::for_source(1000, 500);
        assert_eq!(geometry.natural_aspect_ratio(), 2.0);

        let next = geometry.on_width_changed(500);
        assert_eq!((next.target_width(), next.target_height()), (500, 250));

        let next = next.on_height_changed(100);
        assert_eq!((next.target_width(), next.target_height()), (200, 100));
    }

    #[test]
    fn test_unlocked_edit_keeps_other_side() {
        let geometry = JsGeometry::for_source(1000, 500)
            .on_width_changed(500)
            .with_aspect_lock(false)
            .on_width_changed(300);
        assert_eq!((geometry.target_width(), geometry.target_height()), (300, 250));
        assert!(!geometry.aspect_lock());
    }

    #[test]
    fn test_edits_return_new_values() {
        let geometry = JsGeometry::new();
        let _ = geometry.on_width_changed(10);
        assert_eq!(geometry.target_width(), 800);
    }
}
