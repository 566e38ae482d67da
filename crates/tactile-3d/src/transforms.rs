use glam::{Mat4, Vec3, Vec4};

use crate::error::GeometryError;

/// Smallest absolute value accepted for a determinant or homogeneous divisor.
pub(crate) const HOMOGENEOUS_EPS: f32 = 1e-6;

/// Invert a world-to-camera view matrix into a camera-to-world transform.
///
/// # Errors
///
/// [`GeometryError::DegenerateGeometry`] if the matrix is singular or not finite.
pub fn camera_from_view(view_matrix: &Mat4) -> Result<Mat4, GeometryError> {
    let det = view_matrix.determinant();
    if !det.is_finite() || det.abs() < HOMOGENEOUS_EPS {
        return Err(GeometryError::DegenerateGeometry("view matrix is not invertible"));
    }
    Ok(view_matrix.inverse())
}

/// Apply a 4x4 transform to a 3D point and divide by the homogeneous coordinate.
///
/// # Errors
///
/// [`GeometryError::DegenerateGeometry`] if `w` vanishes.
pub fn transform_point_homogeneous(transform: &Mat4, point: Vec3) -> Result<Vec3, GeometryError> {
    let p: Vec4 = *transform * point.extend(1.0);
    if !p.w.is_finite() || p.w.abs() < HOMOGENEOUS_EPS {
        return Err(GeometryError::DegenerateGeometry("homogeneous coordinate w is close to zero"));
    }
    Ok(p.truncate() / p.w)
}
