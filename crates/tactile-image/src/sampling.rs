use crate::{error::ImageError, image::Image, ImageSize};

/// Map a normalized coordinate to the pixel that contains it.
///
/// The origin is the top-left corner of the raster: `x` grows to the right and
/// `y` grows downwards, so `column = floor(x * width)` and `row = floor(y * height)`.
/// The closed upper edge (`x == 1.0` or `y == 1.0`) maps to the last column or row.
///
/// # Arguments
///
/// * `x` - The normalized horizontal coordinate in `[0, 1]`.
/// * `y` - The normalized vertical coordinate in `[0, 1]`.
/// * `size` - The size of the raster being addressed.
///
/// # Returns
///
/// The `(column, row)` pixel index.
///
/// # Errors
///
/// [`ImageError::OutOfBounds`] if the coordinate is outside the unit square or NaN.
///
/// # Example
///
/// ```
/// use tactile_image::{pixel_coordinates, ImageSize};
///
/// let size = ImageSize { width: 256, height: 192 };
/// assert_eq!(pixel_coordinates(0.5, 0.25, size).unwrap(), (128, 48));
/// assert_eq!(pixel_coordinates(1.0, 1.0, size).unwrap(), (255, 191));
/// ```
pub fn pixel_coordinates(x: f32, y: f32, size: ImageSize) -> Result<(usize, usize), ImageError> {
    // NaN fails both range checks
    if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) || size.is_empty() {
        return Err(ImageError::OutOfBounds(x, y));
    }

    let column = ((x * size.width as f32).floor() as usize).min(size.width - 1);
    let row = ((y * size.height as f32).floor() as usize).min(size.height - 1);

    Ok((column, row))
}

/// Ensure two rasters share the same resolution.
pub fn check_same_size<A, B>(a: &Image<A>, b: &Image<B>) -> Result<(), ImageError> {
    if a.size() != b.size() {
        return Err(ImageError::SizeMismatch(a.size(), b.size()));
    }
    Ok(())
}

impl<T: Copy> Image<T> {
    /// Sample the raster at a normalized coordinate with nearest neighbor lookup.
    ///
    /// See [`pixel_coordinates`] for the axis convention.
    pub fn sample_nearest(&self, x: f32, y: f32) -> Result<T, ImageError> {
        let (column, row) = pixel_coordinates(x, y, self.size())?;
        self.get(column, row)
            .copied()
            .ok_or(ImageError::PixelIndexOutOfBounds(
                column,
                row,
                self.width(),
                self.height(),
            ))
    }
}
