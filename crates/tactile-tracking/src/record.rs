//! Json records for replaying captured sessions offline.
//!
//! Matrices are stored column by column, the layout of [`glam::Mat3::to_cols_array_2d`].

use std::path::Path;

use glam::{Mat3, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tactile_3d::{GeometryError, Plane, Ray, SceneRaycast, SurfaceHit, SurfaceMesh};
use tactile_image::{ConfidenceMap, DepthMap, ImageSize};

use crate::{
    error::TrackingError,
    frame::DepthFrame,
    gesture::Gesture,
    hand::{HandObservation, Landmark},
};

/// A serialized [`DepthFrame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Raw intrinsics, column major.
    pub intrinsics: [[f32; 3]; 3],
    /// Color image `[width, height]`.
    pub image_size: [usize; 2],
    /// Depth map `[width, height]`.
    pub depth_map_size: [usize; 2],
    /// Row-major depth in meters.
    pub depth: Vec<f32>,
    /// Row-major raw confidence bytes.
    pub confidence: Vec<u8>,
    /// World-to-camera transform, column major.
    pub view_matrix: [[f32; 4]; 4],
}

impl FrameRecord {
    /// Build the frame, checking the raster lengths against the map size.
    pub fn into_frame(self) -> Result<DepthFrame, TrackingError> {
        let depth_map_size = ImageSize::from(self.depth_map_size);
        let depth_map = DepthMap::new(depth_map_size, self.depth).map_err(GeometryError::from)?;
        let confidence_map =
            ConfidenceMap::new(depth_map_size, self.confidence).map_err(GeometryError::from)?;

        Ok(DepthFrame {
            intrinsics: Mat3::from_cols_array_2d(&self.intrinsics),
            image_size: ImageSize::from(self.image_size),
            depth_map,
            confidence_map,
            view_matrix: Mat4::from_cols_array_2d(&self.view_matrix),
        })
    }
}

impl From<&DepthFrame> for FrameRecord {
    fn from(frame: &DepthFrame) -> Self {
        let size = frame.depth_map_size();
        Self {
            intrinsics: frame.intrinsics.to_cols_array_2d(),
            image_size: [frame.image_size.width, frame.image_size.height],
            depth_map_size: [size.width, size.height],
            depth: frame.depth_map.as_slice().to_vec(),
            confidence: frame.confidence_map.as_slice().to_vec(),
            view_matrix: frame.view_matrix.to_cols_array_2d(),
        }
    }
}

fn full_confidence() -> f32 {
    1.0
}

/// A serialized [`Landmark`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    #[allow(missing_docs)]
    pub x: f32,
    #[allow(missing_docs)]
    pub y: f32,
    /// Defaults to 1 when the detector reports none.
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

/// A serialized [`HandObservation`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Gesture category label, empty for none.
    #[serde(default)]
    pub gesture: String,
    /// Landmarks in model order.
    pub landmarks: Vec<LandmarkRecord>,
}

impl From<ObservationRecord> for HandObservation {
    fn from(record: ObservationRecord) -> Self {
        Self {
            gesture: Gesture::from_label(&record.gesture),
            landmarks: record
                .landmarks
                .iter()
                .map(|l| Landmark {
                    point: Vec2::new(l.x, l.y),
                    confidence: l.confidence,
                })
                .collect(),
        }
    }
}

/// A serialized surface of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneRecord {
    /// Horizontal plane at `height` meters.
    HorizontalPlane {
        #[allow(missing_docs)]
        height: f32,
    },
    /// Plane through three or four sampled points.
    Plane {
        #[allow(missing_docs)]
        points: Vec<[f32; 3]>,
    },
    /// Indexed triangle mesh.
    Mesh {
        #[allow(missing_docs)]
        vertices: Vec<[f32; 3]>,
        #[allow(missing_docs)]
        indices: Vec<[u32; 3]>,
    },
}

impl SceneRecord {
    /// Build the surface.
    pub fn into_surface(self) -> Result<Surface, TrackingError> {
        let surface = match self {
            SceneRecord::HorizontalPlane { height } => Surface::Plane(Plane::horizontal(height)),
            SceneRecord::Plane { points } => {
                let points: Vec<Vec3> = points.into_iter().map(Vec3::from).collect();
                Surface::Plane(Plane::from_points(&points)?)
            }
            SceneRecord::Mesh { vertices, indices } => {
                let vertices: Vec<Vec3> = vertices.into_iter().map(Vec3::from).collect();
                Surface::Mesh(SurfaceMesh::from_indexed(&vertices, &indices)?)
            }
        };
        Ok(surface)
    }
}

/// A reconstructed surface of the scene.
#[derive(Debug, Clone)]
pub enum Surface {
    #[allow(missing_docs)]
    Plane(Plane),
    #[allow(missing_docs)]
    Mesh(SurfaceMesh),
}

impl SceneRaycast for Surface {
    fn cast_ray(&self, ray: &Ray) -> Vec<SurfaceHit> {
        match self {
            Surface::Plane(plane) => plane.cast_ray(ray),
            Surface::Mesh(mesh) => mesh.cast_ray(ray),
        }
    }
}

/// One captured frame with the hand observed in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    #[allow(missing_docs)]
    pub frame: FrameRecord,
    #[allow(missing_docs)]
    pub observation: ObservationRecord,
}

/// A captured session: a static scene and the frames recorded in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// Surfaces of the scene.
    pub scene: Vec<SceneRecord>,
    /// Frames in capture order.
    pub steps: Vec<ReplayStep>,
}

impl ReplayRecord {
    /// Read a session from a json file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TrackingError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Build every surface of the scene.
    pub fn surfaces(&self) -> Result<Vec<Surface>, TrackingError> {
        self.scene.iter().cloned().map(SceneRecord::into_surface).collect()
    }
}
