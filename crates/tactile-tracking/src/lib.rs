#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the tracking pipeline.
pub mod error;

/// Depth frames and their back-projection.
pub mod frame;

/// Gesture categories.
pub mod gesture;

/// Hand landmarks and observations.
pub mod hand;

pub mod record;

/// Tracking settings.
pub mod settings;

/// The per-frame touch tracker.
pub mod tracker;

pub use error::TrackingError;
pub use frame::DepthFrame;
pub use gesture::Gesture;
pub use hand::{HandLandmark, HandObservation, Landmark};
pub use record::{FrameRecord, ObservationRecord, ReplayRecord, SceneRecord, Surface};
pub use settings::HandTrackingSettings;
pub use tracker::{TouchTracker, TrackingUpdate};
