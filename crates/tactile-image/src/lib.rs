#![deny(missing_docs)]
//! Raster types for depth and confidence maps, addressed by normalized coordinates.

/// single channel raster representation.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Normalized coordinate to pixel lookup.
pub mod sampling;

pub use crate::error::ImageError;
pub use crate::image::{ConfidenceMap, DepthMap, Image, ImageSize};
pub use crate::sampling::{check_same_size, pixel_coordinates};
