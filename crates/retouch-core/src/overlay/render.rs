//! Text rasterization onto an RGBA canvas.
//!
//! Text is set in the bundled DejaVu Sans (`assets/DejaVuSans.ttf`, which
//! covers Latin, Greek and Cyrillic) using `ab_glyph`. `font_size` is the em
//! size in pixels and `(x, y)` is the top of the line box, the same placement
//! as a canvas `fillText` with `textBaseline = "top"`.
//!
//! Glyph coverage is thresholded into an opaque fill, so every painted pixel
//! carries exactly the overlay color. Pixels outside the canvas are skipped.

use std::sync::OnceLock;

use ab_glyph::{point, Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use log::warn;

use super::{TextOverlayState, MAX_FONT_SIZE, MIN_FONT_SIZE};

static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Minimum glyph coverage for a pixel to be painted.
const COVERAGE_THRESHOLD: f32 = 0.5;

/// The bundled font, parsed on first use.
fn font() -> Option<&'static FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(|| match FontArc::try_from_slice(FONT_DATA) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("bundled overlay font failed to load: {}", e);
            None
        }
    })
    .as_ref()
}

/// True if the bundled font has a real glyph for `ch` (not `.notdef`).
pub fn has_glyph(ch: char) -> bool {
    font().is_some_and(|font| font.glyph_id(ch) != GlyphId(0))
}

/// Pixel scale that makes one em `font_size` pixels tall.
///
/// The size is forced into the overlay's font size range first.
fn scale_for(font: &FontArc, font_size: u32) -> PxScale {
    let em = font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE) as f32;
    let height = font.height_unscaled();
    let units_per_em = font.units_per_em().unwrap_or(height);
    PxScale::from(em * height / units_per_em)
}

/// Lay `text` out on one line. Returns the glyphs and the total advance.
fn layout(
    font: &FontArc,
    scale: PxScale,
    text: &str,
    x: f32,
    baseline: f32,
) -> (Vec<Glyph>, f32) {
    let scaled = font.as_scaled(scale);
    let mut caret = x;
    let mut prev: Option<GlyphId> = None;
    let mut glyphs = Vec::with_capacity(text.len());

    for ch in text.chars() {
        let ch = if ch.is_control() { ' ' } else { ch };
        let id = font.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, baseline)));
        caret += scaled.h_advance(id);
        prev = Some(id);
    }

    (glyphs, caret - x)
}

/// Size of the laid-out line box as `(width, height)` in pixels.
pub(crate) fn measure(overlay: &TextOverlayState) -> (u64, u64) {
    let Some(font) = font() else {
        return (0, overlay.font_size as u64);
    };
    let scale = scale_for(font, overlay.font_size);
    let (_, advance) = layout(font, scale, &overlay.text, 0.0, 0.0);
    let height = font.as_scaled(scale).height();
    (advance.max(0.0).ceil() as u64, height.ceil() as u64)
}

/// Paint the overlay text onto `canvas`.
///
/// Does nothing when the overlay is hidden or empty. Returns the number of
/// canvas pixels that were painted.
pub fn draw_text(canvas: &mut RgbaImage, overlay: &TextOverlayState) -> usize {
    if !overlay.is_drawable() {
        return 0;
    }
    let Some(font) = font() else {
        return 0;
    };

    let (canvas_w, canvas_h) = (canvas.width() as i64, canvas.height() as i64);
    let (left, top) = (overlay.x as i64, overlay.y as i64);
    let (box_w, box_h) = measure(overlay);
    let right = left + box_w as i64;
    let bottom = top + box_h as i64;
    if left >= canvas_w || top >= canvas_h || right <= 0 || bottom <= 0 {
        return 0;
    }

    let scale = scale_for(font, overlay.font_size);
    let baseline = overlay.y as f32 + font.as_scaled(scale).ascent();
    let (glyphs, _) = layout(font, scale, &overlay.text, overlay.x as f32, baseline);

    let fill = Rgba([overlay.color.r, overlay.color.g, overlay.color.b, 255]);
    let mut painted = 0;

    for glyph in glyphs {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        let (gx, gy) = (bounds.min.x as i64, bounds.min.y as i64);
        if gx >= canvas_w || gy >= canvas_h || bounds.max.x <= 0.0 || bounds.max.y <= 0.0 {
            continue;
        }

        outlined.draw(|dx, dy, coverage| {
            if coverage < COVERAGE_THRESHOLD {
                return;
            }
            let (px, py) = (gx + dx as i64, gy + dy as i64);
            if px < 0 || py < 0 || px >= canvas_w || py >= canvas_h {
                return;
            }
            canvas.put_pixel(px as u32, py as u32, fill);
            painted += 1;
        });
    }

    painted
}
