//! Filter state WASM bindings.
//!
//! This module provides JavaScript bindings for the FilterState type,
//! allowing the filter sliders to be mirrored from TypeScript.

use crate::types::to_js_error;
use wasm_bindgen::prelude::*;

/// Filter state wrapper for JavaScript
#[wasm_bindgen]
#[derive(Clone, Copy, Default)]
pub struct JsFilterState {
    inner: retouch_core::FilterState,
}

#[wasm_bindgen]
impl JsFilterState {
    /// Create a filter state at the identity values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get brightness (0 to 200 percent)
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    /// Set brightness, clamped into range
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.set_brightness(value);
    }

    /// Get contrast (0 to 200 percent)
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    /// Set contrast, clamped into range
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.set_contrast(value);
    }

    /// Get grayscale (0 to 100 percent)
    #[wasm_bindgen(getter)]
    pub fn grayscale(&self) -> f32 {
        self.inner.grayscale
    }

    /// Set grayscale, clamped into range
    #[wasm_bindgen(setter)]
    pub fn set_grayscale(&mut self, value: f32) {
        self.inner.set_grayscale(value);
    }

    /// Get sepia (0 to 100 percent)
    #[wasm_bindgen(getter)]
    pub fn sepia(&self) -> f32 {
        self.inner.sepia
    }

    /// Set sepia, clamped into range
    #[wasm_bindgen(setter)]
    pub fn set_sepia(&mut self, value: f32) {
        self.inner.set_sepia(value);
    }

    /// Check if every filter is at its identity value
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Restore the identity values
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain JS object; missing fields take identity values
    pub fn from_json(value: JsValue) -> Result<JsFilterState, JsValue> {
        let inner: retouch_core::FilterState =
            serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        Ok(Self {
            inner: inner.clamped(),
        })
    }
}

impl JsFilterState {
    pub(crate) fn inner(&self) -> &retouch_core::FilterState {
        &self.inner
    }

    pub(crate) fn from_inner(inner: retouch_core::FilterState) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_state_defaults() {
        let filters = JsFilterState::new();
        assert!(filters.is_identity());
        assert_eq!(filters.brightness(), 100.0);
        assert_eq!(filters.contrast(), 100.0);
        assert_eq!(filters.grayscale(), 0.0);
        assert_eq!(filters.sepia(), 0.0);
    }

    #[test]
    fn test_setters_clamp() {
        let mut filters = JsFilterState::new();
        filters.set_brightness(250.0);
        filters.set_sepia(-3.0);
        assert_eq!(filters.brightness(), 200.0);
        assert_eq!(filters.sepia(), 0.0);
        assert!(!filters.is_identity());
    }

    #[test]
    fn test_reset() {
        let mut filters = JsFilterState::new();
        filters.set_grayscale(80.0);
        filters.set_contrast(40.0);
        filters.reset();
        assert!(filters.is_identity());
    }
}
