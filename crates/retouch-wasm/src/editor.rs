//! Stateful editor binding.
//!
//! `Editor` wraps a core `EditorSession`: it owns the loaded image and the
//! current edit state, and recomposes after every change so `output` is
//! always ready to paint.
//!
//! # Example
//!
//! ```typescript
//! import { Editor } from '@retouch/wasm';
//!
//! const editor = new Editor();
//! const ticket = editor.begin_load();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const summary = editor.finish_load(ticket, bytes); // "1000x500" or undefined if stale
//!
//! editor.set_brightness(120);
//! editor.set_width(500);
//! const out = editor.output;
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(out.pixels()), out.width, out.height), 0, 0);
//! ```

use crate::filters::JsFilterState;
use crate::geometry::JsGeometry;
use crate::overlay::JsTextOverlay;
use crate::types::{to_js_error, JsImage};
use retouch_core::decode::FilterType;
use retouch_core::{decode_image, ComposeOptions, EditorSession, LoadTicket};
use wasm_bindgen::prelude::*;

/// Opaque handle returned by [`Editor::begin_load`]
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct JsLoadTicket {
    inner: LoadTicket,
}

#[wasm_bindgen]
impl JsLoadTicket {
    /// Sequence number of the load this ticket belongs to
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.inner.generation()
    }
}

/// Image editor session for JavaScript
#[wasm_bindgen]
#[derive(Default)]
pub struct Editor {
    session: EditorSession,
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Loading =====

    /// Start a load. Tickets from earlier loads become stale.
    pub fn begin_load(&mut self) -> JsLoadTicket {
        JsLoadTicket {
            inner: self.session.begin_load(),
        }
    }

    /// True if `ticket` belongs to the latest load
    pub fn is_current(&self, ticket: &JsLoadTicket) -> bool {
        self.session.is_current(ticket.inner)
    }

    /// Decode `bytes` and apply them if `ticket` is still current.
    ///
    /// Returns the natural size as `"WxH"`, or `undefined` when the load was
    /// superseded. Throws if the bytes do not decode; the previous image is
    /// kept in that case.
    pub fn finish_load(
        &mut self,
        ticket: &JsLoadTicket,
        bytes: &[u8],
    ) -> Result<Option<String>, JsValue> {
        let result = if self.session.is_current(ticket.inner) {
            decode_image(bytes)
        } else {
            // Skip the decode; the result would be discarded anyway.
            Err(retouch_core::DecodeError::InvalidFormat)
        };
        self.session
            .finish_load(ticket.inner, result)
            .map(|outcome| outcome.summary())
            .map_err(to_js_error)
    }

    /// Begin and finish a load in one call.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Option<String>, JsValue> {
        let ticket = self.begin_load();
        self.finish_load(&ticket, bytes)
    }

    #[wasm_bindgen(getter)]
    pub fn has_source(&self) -> bool {
        self.session.source().is_some()
    }

    /// Copy of the loaded source, if any
    #[wasm_bindgen(getter)]
    pub fn source(&self) -> Option<JsImage> {
        self.session.source().map(JsImage::from_source)
    }

    // ===== Geometry =====

    #[wasm_bindgen(getter)]
    pub fn geometry(&self) -> JsGeometry {
        JsGeometry::from_inner(*self.session.geometry())
    }

    pub fn set_width(&mut self, width: u32) {
        self.session.set_width(width);
    }

    pub fn set_height(&mut self, height: u32) {
        self.session.set_height(height);
    }

    /// Set the width from raw text box input. Throws on invalid input.
    pub fn set_width_input(&mut self, input: &str) -> Result<(), JsValue> {
        self.session.set_width_input(input).map_err(to_js_error)
    }

    /// Set the height from raw text box input. Throws on invalid input.
    pub fn set_height_input(&mut self, input: &str) -> Result<(), JsValue> {
        self.session.set_height_input(input).map_err(to_js_error)
    }

    pub fn set_aspect_lock(&mut self, aspect_lock: bool) {
        self.session.set_aspect_lock(aspect_lock);
    }

    // ===== Filters =====

    #[wasm_bindgen(getter)]
    pub fn filters(&self) -> JsFilterState {
        JsFilterState::from_inner(*self.session.filters())
    }

    pub fn set_filters(&mut self, filters: &JsFilterState) {
        self.session.set_filters(*filters.inner());
    }

    pub fn set_brightness(&mut self, value: f32) {
        self.session.update_filters(|f| f.set_brightness(value));
    }

    pub fn set_contrast(&mut self, value: f32) {
        self.session.update_filters(|f| f.set_contrast(value));
    }

    pub fn set_grayscale(&mut self, value: f32) {
        self.session.update_filters(|f| f.set_grayscale(value));
    }

    pub fn set_sepia(&mut self, value: f32) {
        self.session.update_filters(|f| f.set_sepia(value));
    }

    pub fn reset_filters(&mut self) {
        self.session.reset_filters();
    }

    // ===== Overlay =====

    #[wasm_bindgen(getter)]
    pub fn overlay(&self) -> JsTextOverlay {
        JsTextOverlay::from_inner(self.session.overlay().clone())
    }

    pub fn set_overlay(&mut self, overlay: &JsTextOverlay) {
        self.session.set_overlay(overlay.inner().clone());
    }

    pub fn set_overlay_text(&mut self, text: String) {
        self.session.update_overlay(|o| o.text = text);
    }

    pub fn set_overlay_position(&mut self, x: i32, y: i32) {
        self.session.update_overlay(|o| {
            o.x = x;
            o.y = y;
        });
    }

    pub fn set_overlay_font_size(&mut self, size: u32) {
        self.session.update_overlay(|o| o.set_font_size(size));
    }

    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.session.update_overlay(|o| o.visible = visible);
    }

    /// Throws on an invalid hex string; the previous color is kept.
    pub fn set_overlay_color(&mut self, hex: &str) -> Result<(), JsValue> {
        self.session.set_overlay_color(hex).map_err(to_js_error)
    }

    // ===== Output =====

    /// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
    pub fn set_resample(&mut self, resample: u8) {
        self.session.set_options(ComposeOptions {
            resample: FilterType::from(resample),
        });
    }

    /// The current composited image, or `undefined` before the first load
    #[wasm_bindgen(getter)]
    pub fn output(&self) -> Option<JsImage> {
        self.session.output().map(JsImage::from_output)
    }

    /// PNG bytes of the current output. Throws if nothing is loaded.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.session.export_png().map_err(to_js_error)
    }
}
