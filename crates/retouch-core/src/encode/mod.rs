//! Export encoding for Retouch.
//!
//! This module provides functionality for:
//! - Encoding a [`CompositedOutput`](crate::CompositedOutput) to PNG
//!
//! PNG is lossless, so decoding the exported file gives back exactly the
//! pixels the compositor produced.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::encode_png;
//!
//! let png_bytes = encode_png(&output).unwrap();
//! std::fs::write(DEFAULT_EXPORT_FILENAME, png_bytes).unwrap();
//! ```

mod png;

pub use png::{encode_png, encode_rgba_png, EncodeError};

/// Suggested file name for the downloaded result.
pub const DEFAULT_EXPORT_FILENAME: &str = "edited-image.png";
