//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate provides WASM bindings to expose the retouch-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - Stateful `Editor` session (load, edit, output, export)
//! - `types` - WASM-compatible wrapper types for image data
//! - `filters`, `geometry`, `overlay` - Edit state wrappers
//! - `decode` - Image decoding bindings
//! - `compose` - Stateless composition
//! - `encode` - PNG export bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { Editor, encode_png, default_export_filename } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new Editor();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! console.log(`Loaded ${editor.load_bytes(bytes)}`);
//! ```

use wasm_bindgen::prelude::*;

mod compose;
mod decode;
mod editor;
mod encode;
mod filters;
mod geometry;
mod logger;
mod overlay;
mod types;

// Re-export public types
pub use compose::compose;
pub use decode::decode_image;
pub use editor::{Editor, JsLoadTicket};
pub use encode::{default_export_filename, encode_png, encode_rgba_png};
pub use filters::JsFilterState;
pub use geometry::{parse_dimension, JsGeometry};
pub use overlay::JsTextOverlay;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level ("error", "warn", "info", "debug", "trace", "off").
///
/// Returns false for an unknown level name.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    logger::set_level(level)
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
