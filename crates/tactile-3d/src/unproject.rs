use glam::{Mat3, Mat4, Vec2, Vec3};
use tactile_image::{check_same_size, pixel_coordinates, ConfidenceMap, DepthMap};

use crate::{
    camera::CameraIntrinsic,
    confidence::ConfidenceLevel,
    error::GeometryError,
    transforms::{camera_from_view, transform_point_homogeneous},
};

/// A depth value paired with the confidence reported for the same pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSample {
    /// Depth in meters along the camera's optical axis.
    pub depth: f32,
    /// Confidence level of the depth value.
    pub confidence: ConfidenceLevel,
}

/// Read the depth and confidence at a normalized coordinate.
///
/// Uses nearest neighbor lookup with the top-left origin convention of
/// [`tactile_image::pixel_coordinates`].
///
/// # Errors
///
/// * [`GeometryError::SizeMismatch`] if the maps differ in resolution.
/// * [`GeometryError::OutOfBounds`] if the point is outside `[0, 1]²`.
/// * [`GeometryError::SampleUnavailable`] if the depth is not a positive finite
///   number or the confidence byte is not a known level.
pub fn sample_depth(
    point: Vec2,
    depth_map: &DepthMap,
    confidence_map: &ConfidenceMap,
) -> Result<DepthSample, GeometryError> {
    check_same_size(depth_map, confidence_map)?;
    let (column, row) = pixel_coordinates(point.x, point.y, depth_map.size())?;

    let unavailable = GeometryError::SampleUnavailable { column, row };

    let depth = *depth_map.get(column, row).ok_or(unavailable.clone())?;
    if !depth.is_finite() || depth <= 0.0 {
        return Err(unavailable);
    }

    let raw = *confidence_map.get(column, row).ok_or(unavailable.clone())?;
    let confidence = ConfidenceLevel::from_raw(raw).ok_or(unavailable)?;

    Ok(DepthSample { depth, confidence })
}

/// Back-project a depth map pixel into camera space using the inverted intrinsics.
///
/// The camera looks down its negative z axis, so the ray `K⁻¹ · (u, v, 1)` is
/// scaled by `-depth`. The x axis is then mirrored because the depth sensor is
/// mounted in a fixed landscape-right orientation; the result has x to the
/// right, y up and z towards the viewer.
///
/// # Arguments
///
/// * `pixel` - Continuous pixel coordinate in the depth map (`normalized * size`).
/// * `depth` - Depth in meters.
/// * `inverted_intrinsics` - Inverse of the camera matrix at depth map resolution.
pub fn camera_point_from_pixel(pixel: Vec2, depth: f32, inverted_intrinsics: &Mat3) -> Vec3 {
    let local = *inverted_intrinsics * pixel.extend(1.0) * -depth;
    Vec3::new(-local.x, local.y, local.z)
}

/// Closed form of [`camera_point_from_pixel`] derived from the pinhole model.
///
/// ```text
/// x =  (u - cx) * d / fx
/// y = -(v - cy) * d / fy
/// z = -d
/// ```
///
/// Image rows grow downwards while camera y grows upwards, hence the sign on `y`.
pub fn pinhole_camera_point(pixel: Vec2, depth: f32, intrinsic: &CameraIntrinsic) -> Vec3 {
    Vec3::new(
        (pixel.x - intrinsic.cx) * depth / intrinsic.fx,
        -(pixel.y - intrinsic.cy) * depth / intrinsic.fy,
        -depth,
    )
}

/// Reconstruct the world position seen at a normalized image coordinate.
///
/// # Arguments
///
/// * `point` - Normalized coordinate in `[0, 1]²`, origin top-left.
/// * `depth_map` - Per-pixel depth in meters.
/// * `confidence_map` - Per-pixel raw confidence, same size as `depth_map`.
/// * `inverted_intrinsics` - See [`crate::camera::compute_inverted_intrinsics`].
/// * `view_matrix` - World-to-camera transform of the frame (landscape-right orientation).
///
/// # Returns
///
/// The point in world coordinates and the confidence of its depth sample.
///
/// # Errors
///
/// Everything [`sample_depth`] reports, plus [`GeometryError::DegenerateGeometry`]
/// when the view matrix is singular or the homogeneous divisor vanishes.
///
/// Example:
///
/// ```
/// use glam::{Mat4, Vec2};
/// use tactile_3d::{camera::CameraIntrinsic, unproject::unproject, ConfidenceLevel};
/// use tactile_image::{ConfidenceMap, DepthMap, ImageSize};
///
/// let size = ImageSize { width: 4, height: 4 };
/// let depth_map = DepthMap::from_size_val(size, 1.5).unwrap();
/// let confidence_map = ConfidenceMap::from_size_val(size, 2).unwrap();
/// let k = CameraIntrinsic { fx: 500.0, fy: 500.0, cx: 0.0, cy: 0.0 };
///
/// let (world, confidence) = unproject(
///     Vec2::new(0.5, 0.5),
///     &depth_map,
///     &confidence_map,
///     &k.to_matrix().inverse(),
///     &Mat4::IDENTITY,
/// ).unwrap();
/// assert!((world.z + 1.5).abs() < 1e-6);
/// assert_eq!(confidence, ConfidenceLevel::High);
/// ```
pub fn unproject(
    point: Vec2,
    depth_map: &DepthMap,
    confidence_map: &ConfidenceMap,
    inverted_intrinsics: &Mat3,
    view_matrix: &Mat4,
) -> Result<(Vec3, ConfidenceLevel), GeometryError> {
    let sample = sample_depth(point, depth_map, confidence_map)?;

    let map_size: [f32; 2] = depth_map.size().into();
    let pixel = point * Vec2::from(map_size);

    let local = camera_point_from_pixel(pixel, sample.depth, inverted_intrinsics);
    let camera_to_world = camera_from_view(view_matrix)?;
    let world = transform_point_homogeneous(&camera_to_world, local)?;

    Ok((world, sample.confidence))
}
