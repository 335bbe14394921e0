//! Output size and aspect-ratio coupling.
//!
//! [`GeometryState`] is a small immutable value. Edits go through the two
//! transition functions [`GeometryState::on_width_changed`] and
//! [`GeometryState::on_height_changed`], which return the next state. While
//! the aspect lock is on, the other dimension follows the ratio captured
//! when the source image was loaded.
//!
//! Raw user input (text boxes) is validated by [`parse_dimension`] before it
//! reaches the transitions, so a `GeometryState` always holds dimensions of
//! at least 1 pixel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted target dimension in pixels. Larger requests are clamped.
pub const MAX_DIMENSION: u32 = 16_384;

/// Target size used before any image is loaded.
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Rejected dimension input.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Input is not an integer.
    #[error("Dimension is not a number: {0:?}")]
    NotANumber(String),

    /// Input is zero or negative.
    #[error("Dimension must be positive, got {0}")]
    NonPositive(i64),

    /// Aspect ratio is zero, negative, NaN or infinite.
    #[error("Aspect ratio must be a positive finite number, got {0}")]
    InvalidRatio(f64),
}

/// Target output size plus the aspect lock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryState {
    /// Output width in pixels (>= 1)
    pub target_width: u32,
    /// Output height in pixels (>= 1)
    pub target_height: u32,
    /// Keep width/height coupled to the natural ratio
    pub aspect_lock: bool,
    /// width / height of the loaded image; fixed until the next load
    pub natural_aspect_ratio: f64,
}

impl Default for GeometryState {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_WIDTH,
            target_height: DEFAULT_HEIGHT,
            aspect_lock: true,
            natural_aspect_ratio: 1.0,
        }
    }
}

impl GeometryState {
    /// Geometry for a freshly loaded image of the given natural size.
    ///
    /// Targets start at the natural size, scaled down as a whole when a side
    /// exceeds [`MAX_DIMENSION`]. The lock setting is carried over from
    /// `self`, the ratio is replaced.
    pub fn for_source(&self, natural_width: u32, natural_height: u32) -> Self {
        let (width, height) = fit_within_max(natural_width.max(1), natural_height.max(1));
        Self {
            target_width: width,
            target_height: height,
            aspect_lock: self.aspect_lock,
            natural_aspect_ratio: natural_width.max(1) as f64 / natural_height.max(1) as f64,
        }
    }

    /// Transition for a width edit.
    pub fn on_width_changed(&self, new_width: u32) -> Self {
        let width = new_width.clamp(1, MAX_DIMENSION);
        let height = if self.aspect_lock {
            to_dimension(width as f64 / self.natural_aspect_ratio)
        } else {
            self.target_height
        };
        Self {
            target_width: width,
            target_height: height,
            ..*self
        }
    }

    /// Transition for a height edit.
    pub fn on_height_changed(&self, new_height: u32) -> Self {
        let height = new_height.clamp(1, MAX_DIMENSION);
        let width = if self.aspect_lock {
            to_dimension(height as f64 * self.natural_aspect_ratio)
        } else {
            self.target_width
        };
        Self {
            target_width: width,
            target_height: height,
            ..*self
        }
    }

    /// Toggle the aspect lock. Dimensions are left as they are.
    pub fn with_aspect_lock(&self, aspect_lock: bool) -> Self {
        Self {
            aspect_lock,
            ..*self
        }
    }

    /// Check a state that came from outside (e.g. deserialized JSON).
    ///
    /// Dimensions are clamped to `1..=MAX_DIMENSION`; a ratio that is not a
    /// positive finite number is rejected.
    pub fn validated(&self) -> Result<Self, GeometryError> {
        let ratio = self.natural_aspect_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(GeometryError::InvalidRatio(ratio));
        }
        Ok(Self {
            target_width: self.target_width.clamp(1, MAX_DIMENSION),
            target_height: self.target_height.clamp(1, MAX_DIMENSION),
            ..*self
        })
    }

    /// Current target dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }
}

/// Shrink `(width, height)` so the longer side is at most [`MAX_DIMENSION`],
/// keeping the ratio.
fn fit_within_max(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return (width, height);
    }
    let ratio = width as f64 / height as f64;
    if width >= height {
        (MAX_DIMENSION, to_dimension(MAX_DIMENSION as f64 / ratio))
    } else {
        (to_dimension(MAX_DIMENSION as f64 * ratio), MAX_DIMENSION)
    }
}

/// Round a derived dimension into the valid range.
fn to_dimension(value: f64) -> u32 {
    if !value.is_finite() {
        return 1;
    }
    (value.round() as u32).clamp(1, MAX_DIMENSION)
}

/// Validate a user-entered dimension.
///
/// Accepts surrounding whitespace. Values above [`MAX_DIMENSION`] are
/// clamped; zero, negatives and non-integers are rejected.
pub fn parse_dimension(input: &str) -> Result<u32, GeometryError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| GeometryError::NotANumber(trimmed.to_string()))?;
    if value <= 0 {
        return Err(GeometryError::NonPositive(value));
    }
    Ok(value.min(MAX_DIMENSION as i64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let geometry = GeometryState::default();
        assert_eq!(geometry.dimensions(), (800, 600));
        assert!(geometry.aspect_lock);
        assert_eq!(geometry.natural_aspect_ratio, 1.0);
    }

    #[test]
    fn test_for_source_sets_natural_size_and_ratio() {
        let geometry = GeometryState::default().for_source(1000, 500);
        assert_eq!(geometry.dimensions(), (1000, 500));
        assert_eq!(geometry.natural_aspect_ratio, 2.0);
    }

    #[test]
    fn test_for_source_scales_oversized_panorama_uniformly() {
        let geometry = GeometryState::default().for_source(20_000, 1_000);
        assert_eq!(geometry.dimensions(), (MAX_DIMENSION, 819));
        assert_eq!(geometry.natural_aspect_ratio, 20.0);

        // A locked edit to the same width changes nothing
        let next = geometry.on_width_changed(MAX_DIMENSION);
        assert_eq!(next.dimensions(), geometry.dimensions());
    }

    #[test]
    fn test_for_source_scales_oversized_portrait_uniformly() {
        let geometry = GeometryState::default().for_source(3_000, 40_000);
        assert_eq!(geometry.dimensions(), (1229, MAX_DIMENSION));
        assert_eq!(geometry.on_height_changed(MAX_DIMENSION).target_width, 1229);
    }

    #[test]
    fn test_for_source_oversized_thin_strip_keeps_one_pixel() {
        let geometry = GeometryState::default().for_source(100_000, 1);
        assert_eq!(geometry.dimensions(), (MAX_DIMENSION, 1));
    }

    #[test]
    fn test_for_source_keeps_lock_setting() {
        let unlocked = GeometryState::default().with_aspect_lock(false);
        assert!(!unlocked.for_source(300, 200).aspect_lock);
    }

    #[test]
    fn test_locked_width_edit_updates_height() {
        let geometry = GeometryState::default().for_source(1000, 500);
        let next = geometry.on_width_changed(500);
        assert_eq!(next.dimensions(), (500, 250));
    }

    #[test]
    fn test_locked_height_edit_updates_width() {
        let geometry = GeometryState::default().for_source(1000, 500);
        let next = geometry.on_height_changed(100);
        assert_eq!(next.dimensions(), (200, 100));
    }

    #[test]
    fn test_unlock_then_width_edit_keeps_height() {
        let geometry = GeometryState::default().for_source(1000, 500);
        let locked = geometry.on_width_changed(500);
        assert_eq!(locked.target_height, 250);

        let unlocked = locked.with_aspect_lock(false).on_width_changed(300);
        assert_eq!(unlocked.dimensions(), (300, 250));
    }

    #[test]
    fn test_unlocked_height_edit_keeps_width() {
        let geometry = GeometryState::default()
            .for_source(640, 480)
            .with_aspect_lock(false);
        let next = geometry.on_height_changed(100);
        assert_eq!(next.dimensions(), (640, 100));
    }

    #[test]
    fn test_rounding_of_derived_dimension() {
        // 3:2 image, width 100 -> 66.67 -> 67
        let geometry = GeometryState::default().for_source(300, 200);
        assert_eq!(geometry.on_width_changed(100).target_height, 67);
    }

    #[test]
    fn test_derived_dimension_never_zero() {
        // Very wide panorama: 1px width would round the height to 0
        let geometry = GeometryState::default().for_source(10_000, 10);
        let next = geometry.on_width_changed(1);
        assert_eq!(next.target_height, 1);
    }

    #[test]
    fn test_ratio_not_changed_by_edits() {
        let geometry = GeometryState::default().for_source(1000, 500);
        let next = geometry
            .on_width_changed(123)
            .with_aspect_lock(false)
            .on_height_changed(999);
        assert_eq!(next.natural_aspect_ratio, 2.0);
    }

    #[test]
    fn test_zero_edit_is_clamped_to_one() {
        let geometry = GeometryState::default().with_aspect_lock(false);
        assert_eq!(geometry.on_width_changed(0).target_width, 1);
    }

    #[test]
    fn test_validated_clamps_dimensions() {
        let raw = GeometryState {
            target_width: 0,
            target_height: 90_000,
            aspect_lock: false,
            natural_aspect_ratio: 1.5,
        };
        let checked = raw.validated().unwrap();
        assert_eq!(checked.dimensions(), (1, MAX_DIMENSION));
        assert_eq!(checked.natural_aspect_ratio, 1.5);
        assert!(!checked.aspect_lock);
    }

    #[test]
    fn test_validated_rejects_bad_ratio() {
        for ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let raw = GeometryState {
                natural_aspect_ratio: ratio,
                ..GeometryState::default()
            };
            assert!(matches!(raw.validated(), Err(GeometryError::InvalidRatio(_))));
        }
    }

    #[test]
    fn test_validated_accepts_default() {
        let geometry = GeometryState::default();
        assert_eq!(geometry.validated(), Ok(geometry));
    }

    #[test]
    fn test_parse_dimension_valid() {
        assert_eq!(parse_dimension("640"), Ok(640));
        assert_eq!(parse_dimension("  42 "), Ok(42));
    }

    #[test]
    fn test_parse_dimension_clamps_large() {
        assert_eq!(parse_dimension("100000"), Ok(MAX_DIMENSION));
    }

    #[test]
    fn test_parse_dimension_rejects_non_positive() {
        assert_eq!(parse_dimension("0"), Err(GeometryError::NonPositive(0)));
        assert_eq!(parse_dimension("-5"), Err(GeometryError::NonPositive(-5)));
    }

    #[test]
    fn test_parse_dimension_rejects_garbage() {
        assert!(matches!(
            parse_dimension("12px"),
            Err(GeometryError::NotANumber(_))
        ));
        assert!(matches!(parse_dimension(""), Err(GeometryError::NotANumber(_))));
        assert!(matches!(
            parse_dimension("1.5"),
            Err(GeometryError::NotANumber(_))
        ));
    }

    #[test]
    fn test_geometry_error_display() {
        assert_eq!(
            GeometryError::NonPositive(-3).to_string(),
            "Dimension must be positive, got -3"
        );
    }
}
