use glam::Vec3;
use log::{debug, trace};
use tactile_3d::{
    intermediate_point, raycast_downward, ConfidenceLevel, IntrinsicsCache, SceneRaycast,
    SurfaceHit,
};

use crate::{
    error::TrackingError,
    frame::DepthFrame,
    gesture::Gesture,
    hand::{HandLandmark, HandObservation, Landmark},
    settings::HandTrackingSettings,
};

/// Result of tracking one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingUpdate {
    /// Gesture of the observed hand.
    pub gesture: Gesture,
    /// World position of the query point between the distal joint and the fingertip.
    pub target: Vec3,
    /// Depth confidence at the query point.
    pub target_confidence: ConfidenceLevel,
    /// World position of the index finger knuckle, when its depth was trusted.
    pub knuckle: Option<Vec3>,
    /// Farthest surface below the query point.
    pub surface: SurfaceHit,
    /// Height of the query point above `surface`, in centimeters.
    pub distance_cm: f32,
    /// Whether `distance_cm` is within the touch threshold.
    pub is_touching: bool,
}

/// Turns hand observations and depth frames into fingertip positions and touch events.
///
/// Frames are independent; the tracker only carries its settings and the
/// inverse intrinsics cache from one frame to the next.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    settings: HandTrackingSettings,
    cache: IntrinsicsCache,
}

impl TouchTracker {
    /// Create a tracker with the given settings.
    ///
    /// # Errors
    ///
    /// [`TrackingError::InvalidSettings`] if the settings fail validation.
    pub fn new(settings: HandTrackingSettings) -> Result<Self, TrackingError> {
        settings.validate()?;
        Ok(Self {
            settings,
            cache: IntrinsicsCache::default(),
        })
    }

    /// Current settings.
    pub fn settings(&self) -> &HandTrackingSettings {
        &self.settings
    }

    /// Replace the settings; takes effect on the next frame.
    pub fn set_settings(&mut self, settings: HandTrackingSettings) -> Result<(), TrackingError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// The inverse intrinsics cache.
    pub fn cache(&self) -> &IntrinsicsCache {
        &self.cache
    }

    /// Track the index fingertip of `observation` in `frame` against `scene`.
    ///
    /// An error means the frame is dropped; the tracker stays usable.
    pub fn process<S>(
        &mut self,
        frame: &DepthFrame,
        observation: &HandObservation,
        scene: &S,
    ) -> Result<TrackingUpdate, TrackingError>
    where
        S: SceneRaycast + ?Sized,
    {
        let update = self.track(frame, observation, scene);
        if let Err(err) = &update {
            debug!("dropping frame: {err}");
        }
        update
    }

    fn track<S>(
        &mut self,
        frame: &DepthFrame,
        observation: &HandObservation,
        scene: &S,
    ) -> Result<TrackingUpdate, TrackingError>
    where
        S: SceneRaycast + ?Sized,
    {
        if !self.settings.tracking_enabled {
            return Err(TrackingError::Disabled);
        }

        let dip = self.trusted_landmark(observation, HandLandmark::IndexFingerDip)?;
        let tip = self.trusted_landmark(observation, HandLandmark::IndexFingerTip)?;

        let query = intermediate_point(dip.point, tip.point, self.settings.dip_tip_fraction);
        let (target, target_confidence) = frame.world_point(query, &mut self.cache)?;
        if !self.settings.target_confidence.contains(&target_confidence) {
            return Err(TrackingError::Untrusted(target_confidence));
        }

        let knuckle = self.knuckle_position(frame, observation);

        let surface = raycast_downward(target, scene)?;
        let distance_cm = surface.distance * 100.0;
        let is_touching = distance_cm <= self.settings.height_threshold_cm;

        trace!(
            "target {target} ({target_confidence}), surface {distance_cm:.1} cm below, \
             touching: {is_touching}"
        );

        Ok(TrackingUpdate {
            gesture: observation.gesture.clone(),
            target,
            target_confidence,
            knuckle,
            surface,
            distance_cm,
            is_touching,
        })
    }

    fn trusted_landmark<'a>(
        &self,
        observation: &'a HandObservation,
        landmark: HandLandmark,
    ) -> Result<&'a Landmark, TrackingError> {
        let found = observation
            .landmark(landmark)
            .ok_or(TrackingError::MissingLandmark(landmark))?;
        let threshold = self.settings.min_landmark_confidence;
        if !(found.confidence >= threshold) {
            return Err(TrackingError::LowLandmarkConfidence {
                landmark,
                confidence: found.confidence,
                threshold,
            });
        }
        Ok(found)
    }

    // The knuckle is auxiliary output: any failure only leaves it unset.
    fn knuckle_position(
        &mut self,
        frame: &DepthFrame,
        observation: &HandObservation,
    ) -> Option<Vec3> {
        let knuckle = self
            .trusted_landmark(observation, HandLandmark::IndexFingerMcp)
            .ok()?;
        match frame.world_point(knuckle.point, &mut self.cache) {
            Ok((position, confidence))
                if self.settings.knuckle_confidence.contains(&confidence) =>
            {
                Some(position)
            }
            Ok((_, confidence)) => {
                trace!("knuckle depth confidence {confidence} not accepted");
                None
            }
            Err(err) => {
                trace!("knuckle not reconstructed: {err}");
                None
            }
        }
    }
}
