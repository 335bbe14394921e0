//! Text overlay model and rendering.
//!
//! The overlay is drawn after the filter pass, so its pixels carry the
//! exact fill color whatever the filter state is.

mod color;
mod render;

pub use color::{ColorParseError, Rgb};
pub use render::{draw_text, has_glyph};

use serde::{Deserialize, Serialize};

/// Smallest accepted font size in pixels.
pub const MIN_FONT_SIZE: u32 = 12;
/// Largest accepted font size in pixels.
pub const MAX_FONT_SIZE: u32 = 120;
/// Font size of a fresh overlay.
pub const DEFAULT_FONT_SIZE: u32 = 48;
/// Signature text a fresh overlay starts with.
pub const DEFAULT_TEXT: &str = "Суяргулаев А.А.";

/// Text stamped on top of the filtered image.
///
/// `x` and `y` place the top-left corner of the line box in output pixel
/// coordinates. They may be negative or past the canvas edge; the
/// part of the text outside the canvas is simply not drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOverlayState {
    pub text: String,
    pub font_size: u32,
    pub color: Rgb,
    pub x: i32,
    pub y: i32,
    pub visible: bool,
}

impl Default for TextOverlayState {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: Rgb::WHITE,
            x: 50,
            y: 50,
            visible: false,
        }
    }
}

impl TextOverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when composition would actually draw something.
    pub fn is_drawable(&self) -> bool {
        self.visible && !self.text.is_empty()
    }

    /// Set the font size, clamped into `MIN_FONT_SIZE..=MAX_FONT_SIZE`.
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    /// Set the fill color from a hex string. The old color is kept on error.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ColorParseError> {
        self.color = Rgb::from_hex(hex)?;
        Ok(())
    }

    /// Bounding box of the laid-out line as `(x, y, width, height)`.
    ///
    /// May extend past the canvas in any direction.
    pub fn bounds(&self) -> (i64, i64, u64, u64) {
        let (width, height) = render::measure(self);
        (self.x as i64, self.y as i64, width, height)
    }

    /// Copy with the font size forced into range.
    pub fn clamped(&self) -> Self {
        Self {
            font_size: self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            ..self.clone()
        }
    }
}
