use tactile_3d::{ConfidenceLevel, GeometryError};
use thiserror::Error;

use crate::hand::HandLandmark;

/// Reasons a frame produced no tracking update.
///
/// None of them is fatal: the frame is dropped and the next one is processed as usual.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Tracking is switched off in the settings.
    #[error("Hand tracking is disabled")]
    Disabled,

    /// The hand observation lacks a landmark the pipeline needs.
    #[error("Hand observation has no {0:?} landmark")]
    MissingLandmark(HandLandmark),

    /// The detector is not confident enough about a landmark.
    #[error("Landmark {landmark:?} confidence {confidence} is below {threshold}")]
    LowLandmarkConfidence {
        /// The landmark that was rejected.
        landmark: HandLandmark,
        /// Confidence reported by the detector.
        confidence: f32,
        /// Minimum confidence from the settings.
        threshold: f32,
    },

    /// The depth sample at the query point has a confidence the settings do not accept.
    #[error("Depth confidence {0} is not accepted")]
    Untrusted(ConfidenceLevel),

    /// Reconstruction or raycasting failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The settings hold a value outside its domain.
    #[error("Invalid settings: {0}")]
    InvalidSettings(&'static str),

    /// Reading a settings or record file failed.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding a settings or record file failed.
    #[error("Failed to decode json: {0}")]
    Json(#[from] serde_json::Error),
}
