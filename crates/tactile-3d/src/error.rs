use tactile_image::{ImageError, ImageSize};
use thiserror::Error;

/// Error types for the reconstruction and raycasting routines.
///
/// Every variant is recoverable: callers drop the current frame and wait for the next one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The normalized coordinate is outside the unit square.
    #[error("Normalized coordinate ({x}, {y}) is outside [0, 1] x [0, 1]")]
    OutOfBounds {
        /// Horizontal normalized coordinate.
        x: f32,
        /// Vertical normalized coordinate.
        y: f32,
    },

    /// The depth or confidence value at the pixel is missing or invalid.
    #[error("No valid depth sample at pixel ({column}, {row})")]
    SampleUnavailable {
        /// Pixel column.
        column: usize,
        /// Pixel row.
        row: usize,
    },

    /// The intrinsic matrix cannot be inverted.
    #[error("Degenerate camera intrinsics: {0}")]
    DegenerateIntrinsics(&'static str),

    /// A geometric quantity collapsed (zero-length normal, vanishing homogeneous divisor, ...).
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// The raycast did not intersect any surface.
    #[error("Raycast did not hit any surface")]
    NoSurfaceHit,

    /// Depth and confidence maps must share a resolution.
    #[error("Depth map size {0} does not match confidence map size {1}")]
    SizeMismatch(ImageSize, ImageSize),

    /// The surface reconstruction exceeds the number of triangles a query may visit.
    #[error("Surface mesh has {actual} triangles, at most {max} are supported")]
    TooManyTriangles {
        /// Upper bound on the number of triangles.
        max: usize,
        /// Number of triangles supplied.
        actual: usize,
    },

    /// Any other raster error.
    #[error(transparent)]
    Image(ImageError),
}

impl From<ImageError> for GeometryError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::OutOfBounds(x, y) => GeometryError::OutOfBounds { x, y },
            ImageError::SizeMismatch(a, b) => GeometryError::SizeMismatch(a, b),
            other => GeometryError::Image(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_error_conversion() {
        let err: GeometryError = ImageError::OutOfBounds(1.5, 0.2).into();
        assert_eq!(err, GeometryError::OutOfBounds { x: 1.5, y: 0.2 });

        let err: GeometryError = ImageError::InvalidChannelShape(3, 4).into();
        assert!(matches!(err, GeometryError::Image(_)));
    }
}
