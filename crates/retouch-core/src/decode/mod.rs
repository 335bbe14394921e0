//! Image decoding for Retouch.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG, PNG and GIF files into a [`SourceImage`]
//! - Applying EXIF orientation so the natural size matches the browser's
//! - Scaling a source onto the output canvas
//!
//! # Architecture
//!
//! Decoding is the one step the shell may run off the main flow (the file
//! is read asynchronously in the browser). The decode itself is synchronous
//! and single-threaded; see [`crate::session`] for how late results are
//! discarded.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod reader;
mod resize;
mod types;

pub use reader::decode_image;
pub use resize::resize_to_canvas;
pub use types::{DecodeError, FilterType, Orientation, SourceImage};
