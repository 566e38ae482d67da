#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Camera intrinsics rescaling, inversion and caching.
pub mod camera;

/// Depth confidence levels.
pub mod confidence;

/// Error types.
pub mod error;

/// Interpolation between image landmarks.
pub mod interpolate;

/// Plane models and point-to-plane distances.
pub mod plane;

/// Ray queries against a surface reconstruction.
pub mod raycast;

/// 3D transforms algorithms.
pub mod transforms;

/// Depth map back-projection into world space.
pub mod unproject;

pub use camera::{compute_inverted_intrinsics, CameraIntrinsic, IntrinsicsCache};
pub use confidence::ConfidenceLevel;
pub use error::GeometryError;
pub use interpolate::intermediate_point;
pub use plane::{distance_to_plane, Plane};
pub use raycast::{raycast_downward, Ray, SceneRaycast, SurfaceHit, SurfaceMesh};
pub use unproject::{unproject, DepthSample};
