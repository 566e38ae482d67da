use std::{collections::BTreeSet, path::Path};

use serde::{Deserialize, Serialize};
use tactile_3d::ConfidenceLevel;

use crate::error::TrackingError;

/// Tunables of the fingertip tracking pipeline.
///
/// Every field has a default, so a settings file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandTrackingSettings {
    /// Process frames at all.
    pub tracking_enabled: bool,
    /// Position of the query point between the index finger's distal joint (0) and tip (1).
    pub dip_tip_fraction: f32,
    /// Depth confidences accepted for the index finger knuckle.
    pub knuckle_confidence: BTreeSet<ConfidenceLevel>,
    /// Depth confidences accepted for the query point.
    pub target_confidence: BTreeSet<ConfidenceLevel>,
    /// A fingertip closer than this to the surface below it counts as touching, in centimeters.
    pub height_threshold_cm: f32,
    /// Minimum detector confidence for the landmarks used.
    pub min_landmark_confidence: f32,
}

impl Default for HandTrackingSettings {
    fn default() -> Self {
        let trusted: BTreeSet<_> = [ConfidenceLevel::High, ConfidenceLevel::Medium].into();
        Self {
            tracking_enabled: true,
            dip_tip_fraction: 1.0,
            knuckle_confidence: trusted.clone(),
            target_confidence: trusted,
            height_threshold_cm: 10.0,
            min_landmark_confidence: 0.3,
        }
    }
}

impl HandTrackingSettings {
    /// Parse settings from a json string and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, TrackingError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a json file and validate them.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TrackingError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every value is inside its domain.
    ///
    /// The fraction may lie outside `[0, 1]` to extrapolate past the fingertip,
    /// but it has to be finite.
    pub fn validate(&self) -> Result<(), TrackingError> {
        if !self.dip_tip_fraction.is_finite() {
            return Err(TrackingError::InvalidSettings("dip_tip_fraction must be finite"));
        }
        if !(self.height_threshold_cm >= 0.0) {
            return Err(TrackingError::InvalidSettings("height_threshold_cm must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.min_landmark_confidence) {
            return Err(TrackingError::InvalidSettings("min_landmark_confidence must be in [0, 1]"));
        }
        Ok(())
    }
}
