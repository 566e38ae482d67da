//! Ray queries against a surface reconstruction.
//!
//! A ray is `r(t) = origin + t * direction` with a unit direction, so the ray
//! parameter of a hit is its distance from the origin in meters.

use glam::Vec3;

use crate::error::GeometryError;

/// Upper bound on the triangles a [`SurfaceMesh`] may hold, keeping every
/// query within a single frame budget.
pub const MAX_SURFACE_TRIANGLES: usize = 1 << 16;

const INTERSECTION_EPS: f32 = 1e-7;

/// Ray in 3D space defined by origin and unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3,
    /// Unit direction of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateGeometry`] if the direction has no length.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        let direction = direction
            .try_normalize()
            .ok_or(GeometryError::DegenerateGeometry("ray direction has zero length"))?;
        Ok(Self { origin, direction })
    }

    /// A ray cast straight down the world's gravity axis, `(0, -1, 0)`.
    pub fn downward(origin: Vec3) -> Self {
        Self {
            origin,
            direction: Vec3::NEG_Y,
        }
    }

    /// Compute the point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// Where a ray met a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Intersection point in world coordinates.
    pub position: Vec3,
    /// Distance from the ray origin in meters, never negative.
    pub distance: f32,
}

/// A scene representation that can be intersected with rays.
///
/// Implemented by the in-crate [`SurfaceMesh`] and [`crate::plane::Plane`]
/// models; a platform surface-reconstruction service can implement it too.
pub trait SceneRaycast {
    /// Every intersection of `ray` with the scene in front of its origin, in any order.
    fn cast_ray(&self, ray: &Ray) -> Vec<SurfaceHit>;
}

impl<T: SceneRaycast> SceneRaycast for [T] {
    fn cast_ray(&self, ray: &Ray) -> Vec<SurfaceHit> {
        self.iter().flat_map(|scene| scene.cast_ray(ray)).collect()
    }
}

impl<T: SceneRaycast> SceneRaycast for Vec<T> {
    fn cast_ray(&self, ray: &Ray) -> Vec<SurfaceHit> {
        self.as_slice().cast_ray(ray)
    }
}

/// A triangle of the reconstructed surface, vertices in world coordinates.
pub type Triangle = [Vec3; 3];

/// Triangle soup approximating the physical environment.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    triangles: Vec<Triangle>,
}

impl SurfaceMesh {
    /// Create a mesh from triangles.
    ///
    /// # Errors
    ///
    /// [`GeometryError::TooManyTriangles`] past [`MAX_SURFACE_TRIANGLES`].
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, GeometryError> {
        if triangles.len() > MAX_SURFACE_TRIANGLES {
            return Err(GeometryError::TooManyTriangles {
                max: MAX_SURFACE_TRIANGLES,
                actual: triangles.len(),
            });
        }
        Ok(Self { triangles })
    }

    /// Create a mesh from a vertex buffer and triangle indices.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateGeometry`] if an index is out of range, and
    /// everything [`SurfaceMesh::new`] reports.
    pub fn from_indexed(vertices: &[Vec3], indices: &[[u32; 3]]) -> Result<Self, GeometryError> {
        let triangles = indices
            .iter()
            .map(|face| -> Result<Triangle, GeometryError> {
                let mut triangle = [Vec3::ZERO; 3];
                for (vertex, &index) in triangle.iter_mut().zip(face) {
                    *vertex = *vertices.get(index as usize).ok_or(
                        GeometryError::DegenerateGeometry("triangle index out of range"),
                    )?;
                }
                Ok(triangle)
            })
            .collect::<Result<Vec<_>, GeometryError>>()?;
        Self::new(triangles)
    }

    /// Get the number of triangles in the mesh.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get as reference the triangles of the mesh.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

/// Möller-Trumbore ray/triangle intersection, both faces, forward hits only.
fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<f32> {
    let [v0, v1, v2] = *triangle;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < INTERSECTION_EPS {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

impl SceneRaycast for SurfaceMesh {
    fn cast_ray(&self, ray: &Ray) -> Vec<SurfaceHit> {
        self.triangles
            .iter()
            .filter_map(|triangle| intersect_triangle(ray, triangle))
            .map(|t| SurfaceHit {
                position: ray.at(t),
                distance: t,
            })
            .collect()
    }
}

/// Cast a ray straight down from `origin` and return the supporting surface below it.
///
/// Among all hits the **farthest** one is selected: a nearer hit is usually an
/// object between the point and the table (a hand, a cup), not the surface it
/// rests on.
///
/// # Errors
///
/// [`GeometryError::NoSurfaceHit`] if nothing lies below `origin`.
///
/// Example:
///
/// ```
/// use glam::Vec3;
/// use tactile_3d::{plane::Plane, raycast::raycast_downward};
///
/// let table = Plane::horizontal(0.75);
/// let hit = raycast_downward(Vec3::new(0.1, 0.9, -0.3), &table).unwrap();
/// assert!((hit.distance - 0.15).abs() < 1e-6);
/// ```
pub fn raycast_downward<S>(origin: Vec3, scene: &S) -> Result<SurfaceHit, GeometryError>
where
    S: SceneRaycast + ?Sized,
{
    let ray = Ray::downward(origin);
    scene
        .cast_ray(&ray)
        .into_iter()
        .filter(|hit| hit.distance.is_finite() && hit.distance >= 0.0)
        .max_by(|a, b| a.distance.total_cmp(&b.distance))
        .ok_or(GeometryError::NoSurfaceHit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two triangles covering the square `[-size, size]²` at height `y`.
    fn floor_quad(y: f32, size: f32) -> [Triangle; 2] {
        let a = Vec3::new(-size, y, -size);
        let b = Vec3::new(size, y, -size);
        let c = Vec3::new(size, y, size);
        let d = Vec3::new(-size, y, size);
        [[a, b, c], [a, c, d]]
    }

    #[test]
    fn test_ray_new_normalizes() -> Result<(), GeometryError> {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -4.0, 0.0))?;
        assert_eq!(ray.direction, Vec3::NEG_Y);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, -2.0, 0.0));
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_err());
        Ok(())
    }

    #[test]
    fn test_raycast_flat_mesh() -> Result<(), GeometryError> {
        let mesh = SurfaceMesh::new(floor_quad(0.72, 1.0).to_vec())?;
        let hit = raycast_downward(Vec3::new(0.2, 1.1, 0.4), &mesh)?;
        assert_relative_eq!(hit.distance, 1.1 - 0.72, epsilon = 1e-6);
        assert_relative_eq!(hit.position.y, 0.72, epsilon = 1e-6);
        assert_relative_eq!(hit.position.x, 0.2);
        Ok(())
    }

    #[test]
    fn test_raycast_prefers_farthest_hit() -> Result<(), GeometryError> {
        // a small occluder 10cm above the table
        let mut triangles = floor_quad(0.0, 1.0).to_vec();
        triangles.extend(floor_quad(0.1, 0.05));
        let mesh = SurfaceMesh::new(triangles)?;

        let hits = mesh.cast_ray(&Ray::downward(Vec3::new(0.0, 0.5, 0.01)));
        assert_eq!(hits.len(), 2);

        let hit = raycast_downward(Vec3::new(0.0, 0.5, 0.01), &mesh)?;
        assert_relative_eq!(hit.distance, 0.5, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_raycast_no_hit() -> Result<(), GeometryError> {
        let mesh = SurfaceMesh::new(floor_quad(0.0, 1.0).to_vec())?;
        // below the surface
        assert_eq!(
            raycast_downward(Vec3::new(0.0, -0.5, 0.0), &mesh),
            Err(GeometryError::NoSurfaceHit)
        );
        // beside the surface
        assert_eq!(
            raycast_downward(Vec3::new(3.0, 0.5, 0.0), &mesh),
            Err(GeometryError::NoSurfaceHit)
        );
        assert_eq!(
            raycast_downward(Vec3::ZERO, &SurfaceMesh::default()),
            Err(GeometryError::NoSurfaceHit)
        );
        Ok(())
    }

    #[test]
    fn test_mesh_from_indexed() -> Result<(), GeometryError> {
        let vertices = [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 1.0),
        ];
        let mesh = SurfaceMesh::from_indexed(&vertices, &[[0, 1, 2], [0, 2, 3]])?;
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles()[1][2], vertices[3]);

        assert!(SurfaceMesh::from_indexed(&vertices, &[[0, 1, 4]]).is_err());
        Ok(())
    }

    #[test]
    fn test_mesh_triangle_cap() {
        let triangles = vec![[Vec3::ZERO; 3]; MAX_SURFACE_TRIANGLES + 1];
        assert!(matches!(
            SurfaceMesh::new(triangles),
            Err(GeometryError::TooManyTriangles { .. })
        ));
    }

    #[test]
    fn test_scene_of_many_surfaces() -> Result<(), GeometryError> {
        let table = SurfaceMesh::new(floor_quad(0.7, 0.5).to_vec())?;
        let floor = SurfaceMesh::new(floor_quad(0.0, 3.0).to_vec())?;
        let scene = vec![table, floor];

        let origin = Vec3::new(0.1, 1.0, -0.2);
        assert_eq!(scene.cast_ray(&Ray::downward(origin)).len(), 2);
        let hit = raycast_downward(origin, &scene)?;
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-6);
        Ok(())
    }
}
