use glam::{Mat3, Mat4, Vec2, Vec3};
use tactile_3d::{unproject, ConfidenceLevel, GeometryError, IntrinsicsCache};
use tactile_image::{ConfidenceMap, DepthMap, ImageSize};

/// One captured frame: camera calibration, depth estimate and pose.
#[derive(Debug, Clone)]
pub struct DepthFrame {
    /// Raw intrinsics for the full-resolution color image.
    pub intrinsics: Mat3,
    /// Resolution of the color image the intrinsics refer to.
    pub image_size: ImageSize,
    /// Per-pixel depth in meters.
    pub depth_map: DepthMap,
    /// Per-pixel confidence of `depth_map`, same size.
    pub confidence_map: ConfidenceMap,
    /// World-to-camera transform.
    pub view_matrix: Mat4,
}

impl DepthFrame {
    /// Resolution of the depth map.
    pub fn depth_map_size(&self) -> ImageSize {
        self.depth_map.size()
    }

    /// Reconstruct the world point seen at the normalized image point `point`.
    ///
    /// The rescaled inverse intrinsics are looked up in `cache`.
    pub fn world_point(
        &self,
        point: Vec2,
        cache: &mut IntrinsicsCache,
    ) -> Result<(Vec3, ConfidenceLevel), GeometryError> {
        let inverted =
            cache.get_or_compute(&self.intrinsics, self.image_size, self.depth_map_size())?;
        unproject(
            point,
            &self.depth_map,
            &self.confidence_map,
            &inverted,
            &self.view_matrix,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tactile_3d::CameraIntrinsic;

    #[test]
    fn test_world_point() -> Result<(), Box<dyn std::error::Error>> {
        let depth_size = ImageSize::from([8, 6]);
        let frame = DepthFrame {
            intrinsics: CameraIntrinsic {
                fx: 1000.0,
                fy: 1000.0,
                cx: 16.0,
                cy: 12.0,
            }
            .to_matrix(),
            image_size: ImageSize::from([16, 12]),
            depth_map: DepthMap::from_size_val(depth_size, 2.0)?,
            confidence_map: ConfidenceMap::from_size_val(depth_size, 1)?,
            view_matrix: Mat4::IDENTITY,
        };

        let mut cache = IntrinsicsCache::default();
        let (world, confidence) = frame.world_point(Vec2::new(0.5, 0.5), &mut cache)?;

        // scaled intrinsics: fx = fy = 500, cx = 8, cy = 6
        assert_relative_eq!(world.x, (4.0 - 8.0) * 2.0 / 500.0, epsilon = 1e-6);
        assert_relative_eq!(world.y, -(3.0 - 6.0) * 2.0 / 500.0, epsilon = 1e-6);
        assert_relative_eq!(world.z, -2.0, epsilon = 1e-6);
        assert_eq!(confidence, ConfidenceLevel::Medium);
        assert_eq!(cache.len(), 1);

        frame.world_point(Vec2::new(0.1, 0.9), &mut cache)?;
        assert_eq!(cache.len(), 1);
        Ok(())
    }
}
