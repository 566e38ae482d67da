use glam::Vec3;

use crate::{
    error::GeometryError,
    raycast::{Ray, SceneRaycast, SurfaceHit},
};

/// Smallest accepted normal length for an explicit plane equation.
const NORMAL_EPS: f32 = 1e-6;

/// Smallest accepted sine of the angle between two sample edges.
const COLLINEAR_EPS: f32 = 1e-4;

/// An infinite plane `dot(normal, p) + offset = 0` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and offset.
    ///
    /// Both are divided by the normal length so that [`Plane::distance`] is metric.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateGeometry`] if the normal has (nearly) zero length.
    pub fn new(normal: Vec3, offset: f32) -> Result<Self, GeometryError> {
        let length = checked_normal_length(normal)?;
        Ok(Self {
            normal: normal / length,
            offset: offset / length,
        })
    }

    /// Horizontal plane at height `y`, normal pointing up.
    pub fn horizontal(y: f32) -> Self {
        Self {
            normal: Vec3::Y,
            offset: -y,
        }
    }

    /// Fit a plane through three or four surface samples assumed coplanar.
    ///
    /// With three samples the normal is `(p1 - p0) × (p2 - p0)`; with four it is
    /// the cross product of the diagonals `(p2 - p0) × (p3 - p1)`. The offset is
    /// `-dot(normal, p0)`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateGeometry`] if the samples are (nearly) collinear
    /// or coincide, or if fewer than three or more than four are given.
    ///
    /// Example:
    ///
    /// ```
    /// use glam::Vec3;
    /// use tactile_3d::plane::Plane;
    ///
    /// let plane = Plane::from_points(&[Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
    /// assert_eq!(plane.distance(Vec3::new(0.3, -2.0, 0.25)), 0.25);
    /// ```
    pub fn from_points(samples: &[Vec3]) -> Result<Self, GeometryError> {
        let (edge_a, edge_b) = match samples {
            [p0, p1, p2] => (*p1 - *p0, *p2 - *p0),
            [p0, p1, p2, p3] => (*p2 - *p0, *p3 - *p1),
            _ => {
                return Err(GeometryError::DegenerateGeometry("a plane needs three or four samples"))
            }
        };

        let normal = edge_a.cross(edge_b);
        let length = normal.length();
        let scale = edge_a.length() * edge_b.length();
        if !scale.is_normal() || !length.is_normal() || length < COLLINEAR_EPS * scale {
            return Err(GeometryError::DegenerateGeometry("plane samples are collinear"));
        }

        // `Plane::new` would reject short normals of small sample patches
        let normal = normal / length;
        Ok(Self {
            normal,
            offset: -normal.dot(samples[0]),
        })
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Offset `d` of the plane equation.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance of `point`, positive on the side the normal points to.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    /// Unsigned distance of `point` to the plane in meters.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.signed_distance(point).abs()
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.signed_distance(point) * self.normal
    }
}

fn checked_normal_length(normal: Vec3) -> Result<f32, GeometryError> {
    let length = normal.length();
    if !length.is_finite() || length < NORMAL_EPS {
        return Err(GeometryError::DegenerateGeometry("plane normal has zero length"));
    }
    Ok(length)
}

/// Distance from `point` to the plane `dot(normal, p) + offset = 0`.
///
/// Computes `|dot(normal, point) + offset| / |normal|`, so the normal does not
/// need to be unit length.
///
/// # Errors
///
/// [`GeometryError::DegenerateGeometry`] if the normal has (nearly) zero length.
pub fn distance_to_plane(point: Vec3, normal: Vec3, offset: f32) -> Result<f32, GeometryError> {
    let length = checked_normal_length(normal)?;
    Ok((normal.dot(point) + offset).abs() / length)
}

/// Distance from `point` to the plane through three or four surface samples.
///
/// See [`Plane::from_points`] for the failure cases.
pub fn distance_to_sampled_plane(point: Vec3, samples: &[Vec3]) -> Result<f32, GeometryError> {
    Ok(Plane::from_points(samples)?.distance(point))
}

impl SceneRaycast for Plane {
    fn cast_ray(&self, ray: &Ray) -> Vec<SurfaceHit> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < NORMAL_EPS {
            return Vec::new();
        }
        let t = -self.signed_distance(ray.origin) / denom;
        if t.is_nan() || t < 0.0 {
            return Vec::new();
        }
        vec![SurfaceHit {
            position: ray.at(t),
            distance: t,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raycast::raycast_downward;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_to_xy_plane() -> Result<(), GeometryError> {
        let samples = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        for z0 in [0.0, 0.37, -1.25, 12.0] {
            let distance = distance_to_sampled_plane(Vec3::new(0.0, 0.0, z0), &samples)?;
            assert_relative_eq!(distance, z0.abs());
        }
        Ok(())
    }

    #[test]
    fn test_distance_to_plane_unnormalized() -> Result<(), GeometryError> {
        // 3 * (y - 0.5) = 0
        let distance =
            distance_to_plane(Vec3::new(4.0, 2.0, -1.0), Vec3::new(0.0, 3.0, 0.0), -1.5)?;
        assert_relative_eq!(distance, 1.5);
        Ok(())
    }

    #[test]
    fn test_distance_to_plane_zero_normal() {
        assert!(matches!(
            distance_to_plane(Vec3::ONE, Vec3::ZERO, 1.0),
            Err(GeometryError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_collinear_samples() {
        let samples = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        ];
        let res = distance_to_sampled_plane(Vec3::new(0.0, 0.0, 1.0), &samples);
        assert!(matches!(res, Err(GeometryError::DegenerateGeometry(_))));

        let repeated = [Vec3::ONE; 3];
        assert!(Plane::from_points(&repeated).is_err());
        assert!(Plane::from_points(&[Vec3::ZERO, Vec3::X]).is_err());
    }

    #[test]
    fn test_sub_millimetre_samples() -> Result<(), GeometryError> {
        let samples = [
            Vec3::ZERO,
            Vec3::new(0.0009, 0.0, 0.0),
            Vec3::new(0.0, 0.0009, 0.0),
        ];
        let plane = Plane::from_points(&samples)?;
        assert_relative_eq!(plane.normal().length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(
            distance_to_sampled_plane(Vec3::new(0.0, 0.0, 0.5), &samples)?,
            0.5,
            epsilon = 1e-6
        );
        Ok(())
    }

    #[test]
    fn test_four_samples() -> Result<(), GeometryError> {
        // a table top at 0.74m sampled at its corners
        let samples = [
            Vec3::new(-0.4, 0.74, -0.3),
            Vec3::new(0.4, 0.74, -0.3),
            Vec3::new(0.4, 0.74, 0.3),
            Vec3::new(-0.4, 0.74, 0.3),
        ];
        let plane = Plane::from_points(&samples)?;
        assert_relative_eq!(plane.normal().y.abs(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(plane.distance(Vec3::new(0.1, 0.9, 0.0)), 0.16, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_plane_project() -> Result<(), GeometryError> {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 2.0), -2.0)?;
        assert_eq!(plane.project(Vec3::new(1.0, 2.0, 5.0)), Vec3::new(1.0, 2.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_raycast_horizontal_plane_exact() -> Result<(), GeometryError> {
        for (h, big_h) in [(0.0, 1.0), (0.72, 0.95), (-0.3, 2.5), (0.7431, 0.8123)] {
            let hit = raycast_downward(Vec3::new(0.25, big_h, -0.5), &Plane::horizontal(h))?;
            assert_eq!(hit.distance, big_h - h);
            assert_relative_eq!(hit.position.y, h, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_raycast_plane_misses() -> Result<(), GeometryError> {
        // below the plane
        assert_eq!(
            raycast_downward(Vec3::new(0.0, -1.0, 0.0), &Plane::horizontal(0.0)),
            Err(GeometryError::NoSurfaceHit)
        );
        // parallel wall
        let wall = Plane::new(Vec3::X, 0.0)?;
        assert_eq!(
            raycast_downward(Vec3::new(1.0, 1.0, 0.0), &wall),
            Err(GeometryError::NoSurfaceHit)
        );
        Ok(())
    }
}
