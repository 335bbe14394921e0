//! Text overlay WASM bindings.

use crate::types::to_js_error;
use retouch_core::overlay::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use wasm_bindgen::prelude::*;

/// Text overlay wrapper for JavaScript
#[wasm_bindgen]
#[derive(Clone, Default)]
pub struct JsTextOverlay {
    inner: retouch_core::TextOverlayState,
}

#[wasm_bindgen]
impl JsTextOverlay {
    /// Create a hidden overlay with empty text at (50, 50)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.text.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_text(&mut self, text: String) {
        self.inner.text = text;
    }

    /// Font size in pixels (12 to 120)
    #[wasm_bindgen(getter)]
    pub fn font_size(&self) -> u32 {
        self.inner.font_size
    }

    #[wasm_bindgen(setter)]
    pub fn set_font_size(&mut self, size: u32) {
        self.inner.set_font_size(size);
    }

    /// Fill color as `#RRGGBB`
    #[wasm_bindgen(getter)]
    pub fn color(&self) -> String {
        self.inner.color.to_hex()
    }

    /// Set the fill color from a hex string such as `#FF8800`.
    ///
    /// The previous color is kept when the string does not parse.
    pub fn set_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.inner.set_color_hex(hex).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> i32 {
        self.inner.x
    }

    #[wasm_bindgen(setter)]
    pub fn set_x(&mut self, x: i32) {
        self.inner.x = x;
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> i32 {
        self.inner.y
    }

    #[wasm_bindgen(setter)]
    pub fn set_y(&mut self, y: i32) {
        self.inner.y = y;
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.inner.visible
    }

    #[wasm_bindgen(setter)]
    pub fn set_visible(&mut self, visible: bool) {
        self.inner.visible = visible;
    }

    /// True when composing would draw any text
    pub fn is_drawable(&self) -> bool {
        self.inner.is_drawable()
    }

    /// Smallest accepted font size
    pub fn min_font_size() -> u32 {
        MIN_FONT_SIZE
    }

    /// Largest accepted font size
    pub fn max_font_size() -> u32 {
        MAX_FONT_SIZE
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain JS object; missing fields take defaults
    pub fn from_json(value: JsValue) -> Result<JsTextOverlay, JsValue> {
        let mut inner: retouch_core::TextOverlayState =
            serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        let size = inner.font_size;
        inner.set_font_size(size);
        Ok(Self { inner })
    }
}

impl JsTextOverlay {
    pub(crate) fn inner(&self) -> &retouch_core::TextOverlayState {
        &self.inner
    }

    pub(crate) fn from_inner(inner: retouch_core::TextOverlayState) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_defaults() {
        let overlay = JsTextOverlay::new();
        assert_eq!(overlay.text(), retouch_core::overlay::DEFAULT_TEXT);
        assert_eq!(overlay.font_size(), 48);
        assert_eq!(overlay.color(), "#FFFFFF");
        assert_eq!((overlay.x(), overlay.y()), (50, 50));
        assert!(!overlay.visible());
        assert!(!overlay.is_drawable());
    }

    #[test]
    fn test_font_size_clamped() {
        let mut overlay = JsTextOverlay::new();
        overlay.set_font_size(4);
        assert_eq!(overlay.font_size(), JsTextOverlay::min_font_size());
        overlay.set_font_size(999);
        assert_eq!(overlay.font_size(), JsTextOverlay::max_font_size());
    }

    #[test]
    fn test_drawable_once_visible_with_text() {
        let mut overlay = JsTextOverlay::new();
        overlay.set_text("Hi".to_string());
        overlay.set_visible(true);
        assert!(overlay.is_drawable());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_color_valid_and_invalid() {
        let mut overlay = JsTextOverlay::new();
        assert!(overlay.set_color("#ff0000").is_ok());
        assert_eq!(overlay.color(), "#FF0000");
        assert!(overlay.set_color("red").is_err());
        assert_eq!(overlay.color(), "#FF0000");
    }

    #[wasm_bindgen_test]
    fn test_json_fills_defaults() {
        let overlay = JsTextOverlay::new();
        let value = overlay.to_json().unwrap();
        let back = JsTextOverlay::from_json(value).unwrap();
        assert_eq!(back.inner(), overlay.inner());
    }
}
