use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use tactile_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 256,
///   height: 192,
/// };
///
/// assert_eq!(image_size.width, 256);
/// assert_eq!(image_size.height, 192);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns the number of pixels covered by this size, saturating at `usize::MAX`.
    #[inline]
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Returns the number of pixels covered by this size, or `None` on overflow.
    #[inline]
    pub fn checked_area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Returns true if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [f32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as f32, size.height as f32]
    }
}

/// A single channel raster stored row major, with the origin at the top-left pixel.
///
/// Depth maps and confidence maps delivered by the sensor are both single
/// channel rasters of the same resolution, see [`DepthMap`] and [`ConfidenceMap`].
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    data: Vec<T>,
}

/// Per-pixel depth in meters.
pub type DepthMap = Image<f32>;

/// Per-pixel raw confidence byte (0 = low, 1 = medium, 2 = high).
pub type ConfidenceMap = Image<u8>;

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in row major order.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use tactile_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32>::new(
    ///     ImageSize {
    ///         width: 4,
    ///         height: 3,
    ///     },
    ///     vec![0.0; 4 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.width(), 4);
    /// assert_eq!(image.height(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let area = size.checked_area().ok_or(ImageError::SizeOverflow(size))?;
        if data.len() != area {
            return Err(ImageError::InvalidChannelShape(data.len(), area));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size filled with `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let area = size.checked_area().ok_or(ImageError::SizeOverflow(size))?;
        Image::new(size, vec![val; area])
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel data as a flat row major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable flat row major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a reference to the pixel at `(column, row)` or `None` if out of bounds.
    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        if column >= self.size.width || row >= self.size.height {
            return None;
        }
        self.data.get(row * self.size.width + column)
    }

    /// Set the pixel at `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the pixel is outside the image.
    pub fn set(&mut self, column: usize, row: usize, val: T) -> Result<(), ImageError> {
        if column >= self.size.width || row >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                column,
                row,
                self.size.width,
                self.size.height,
            ));
        }
        self.data[row * self.size.width + column] = val;
        Ok(())
    }
}
