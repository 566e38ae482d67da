use std::collections::{HashMap, VecDeque};

use glam::{Mat3, Vec3};
use log::debug;
use tactile_image::ImageSize;

use crate::error::GeometryError;

/// Smallest absolute determinant accepted when inverting an intrinsic matrix.
const DETERMINANT_EPS: f32 = 1e-8;

/// Represents the instrinsic parameters of a pinhole camera
///
/// The parameters are expressed in pixels of the image they were calibrated for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsic {
    /// The focal length in the x direction
    pub fx: f32,
    /// The focal length in the y direction
    pub fy: f32,
    /// The x coordinate of the principal point
    pub cx: f32,
    /// The y coordinate of the principal point
    pub cy: f32,
}

impl CameraIntrinsic {
    /// Build the column major 3x3 camera matrix.
    ///
    /// ```text
    /// | fx  0  cx |
    /// |  0 fy  cy |
    /// |  0  0   1 |
    /// ```
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::from_cols(
            Vec3::new(self.fx, 0.0, 0.0),
            Vec3::new(0.0, self.fy, 0.0),
            Vec3::new(self.cx, self.cy, 1.0),
        )
    }

    /// Read the focal lengths and principal point back from a camera matrix.
    pub fn from_matrix(k: &Mat3) -> Self {
        Self {
            fx: k.x_axis.x,
            fy: k.y_axis.y,
            cx: k.z_axis.x,
            cy: k.z_axis.y,
        }
    }

    /// Rescale the intrinsics from the image resolution to the depth map resolution.
    ///
    /// The focal length and principal point of each axis are divided by
    /// `image_size / depth_map_size` along that axis.
    pub fn scaled_to(
        &self,
        image_size: ImageSize,
        depth_map_size: ImageSize,
    ) -> Result<Self, GeometryError> {
        let (scale_x, scale_y) = resolution_scale(image_size, depth_map_size)?;
        Ok(Self {
            fx: self.fx / scale_x,
            fy: self.fy / scale_y,
            cx: self.cx / scale_x,
            cy: self.cy / scale_y,
        })
    }
}

impl From<CameraIntrinsic> for Mat3 {
    fn from(intrinsic: CameraIntrinsic) -> Self {
        intrinsic.to_matrix()
    }
}

fn resolution_scale(
    image_size: ImageSize,
    depth_map_size: ImageSize,
) -> Result<(f32, f32), GeometryError> {
    if image_size.is_empty() || depth_map_size.is_empty() {
        return Err(GeometryError::DegenerateIntrinsics(
            "image and depth map sizes must be non-zero",
        ));
    }
    Ok((
        image_size.width as f32 / depth_map_size.width as f32,
        image_size.height as f32 / depth_map_size.height as f32,
    ))
}

/// Rescale raw camera intrinsics to the depth map resolution and invert them.
///
/// # Arguments
///
/// * `raw_intrinsics` - The camera matrix for the captured image, column major.
/// * `image_size` - The resolution the intrinsics refer to.
/// * `depth_map_size` - The resolution of the depth map.
///
/// # Returns
///
/// The inverse of the rescaled camera matrix. It maps homogeneous depth map
/// pixel coordinates to camera rays.
///
/// # Errors
///
/// [`GeometryError::DegenerateIntrinsics`] if a size is zero or the rescaled
/// matrix is not invertible.
///
/// Example:
///
/// ```
/// use tactile_3d::camera::{compute_inverted_intrinsics, CameraIntrinsic};
/// use tactile_image::ImageSize;
///
/// let k = CameraIntrinsic { fx: 1500.0, fy: 1500.0, cx: 960.0, cy: 720.0 };
/// let k_inv = compute_inverted_intrinsics(
///     &k.to_matrix(),
///     ImageSize { width: 1920, height: 1440 },
///     ImageSize { width: 256, height: 192 },
/// ).unwrap();
/// assert!((k_inv.x_axis.x - 1.0 / 200.0).abs() < 1e-6);
/// ```
pub fn compute_inverted_intrinsics(
    raw_intrinsics: &Mat3,
    image_size: ImageSize,
    depth_map_size: ImageSize,
) -> Result<Mat3, GeometryError> {
    let (scale_x, scale_y) = resolution_scale(image_size, depth_map_size)?;

    let mut k = *raw_intrinsics;
    k.x_axis.x /= scale_x;
    k.y_axis.y /= scale_y;
    k.z_axis.x /= scale_x;
    k.z_axis.y /= scale_y;

    let det = k.determinant();
    if !det.is_finite() || det.abs() < DETERMINANT_EPS {
        return Err(GeometryError::DegenerateIntrinsics("rescaled camera matrix is not invertible"));
    }

    Ok(k.inverse())
}

type CacheKey = (ImageSize, ImageSize);

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    raw_intrinsics: Mat3,
    inverted: Mat3,
}

/// Memoizes [`compute_inverted_intrinsics`] per `(image size, depth map size)` pair.
///
/// The cache is owned by the caller. An entry is only served when both sizes
/// and the raw intrinsics match the request, so a resolution change can never
/// yield a stale inverse. The number of entries is bounded and the oldest
/// entry is evicted first.
#[derive(Debug, Clone)]
pub struct IntrinsicsCache {
    entries: HashMap<CacheKey, CacheEntry>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl Default for IntrinsicsCache {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl IntrinsicsCache {
    /// Number of resolution pairs kept by [`IntrinsicsCache::default`].
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Create an empty cache holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Return the inverted intrinsics for the request, computing them on a miss.
    ///
    /// Failures are not cached.
    pub fn get_or_compute(
        &mut self,
        raw_intrinsics: &Mat3,
        image_size: ImageSize,
        depth_map_size: ImageSize,
    ) -> Result<Mat3, GeometryError> {
        let key = (image_size, depth_map_size);

        if let Some(entry) = self.entries.get(&key) {
            if entry.raw_intrinsics == *raw_intrinsics {
                return Ok(entry.inverted);
            }
            debug!("intrinsics changed for {image_size} -> {depth_map_size}, recomputing inverse");
        } else {
            debug!("intrinsics cache miss for {image_size} -> {depth_map_size}");
        }

        let inverted = compute_inverted_intrinsics(raw_intrinsics, image_size, depth_map_size)?;
        self.insert(key, CacheEntry {
            raw_intrinsics: *raw_intrinsics,
            inverted,
        });

        Ok(inverted)
    }

    fn insert(&mut self, key: CacheKey, entry: CacheEntry) {
        if self.entries.insert(key, entry).is_none() {
            self.order.push_back(key);
        }
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Number of cached resolution pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached resolution pairs.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
