/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the pixel count of a size does not fit in `usize`.
    #[error("Image size {0} overflows the pixel count")]
    SizeOverflow(crate::ImageSize),

    /// Error when a normalized coordinate lies outside the unit square.
    #[error("Normalized coordinate ({0}, {1}) is outside [0, 1] x [0, 1]")]
    OutOfBounds(f32, f32),

    /// Error when a pixel index lies outside the image.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when two images that must share a resolution do not.
    #[error("Image sizes do not match: {0} != {1}")]
    SizeMismatch(crate::ImageSize, crate::ImageSize),
}
