use glam::Vec2;

use crate::gesture::Gesture;

/// The 21 hand landmarks of the hand landmark model, in model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandLandmark {
    #[allow(missing_docs)]
    Wrist = 0,
    #[allow(missing_docs)]
    ThumbCmc,
    #[allow(missing_docs)]
    ThumbMcp,
    #[allow(missing_docs)]
    ThumbIp,
    #[allow(missing_docs)]
    ThumbTip,
    /// Index finger knuckle.
    IndexFingerMcp,
    #[allow(missing_docs)]
    IndexFingerPip,
    /// Index finger distal joint.
    IndexFingerDip,
    /// Index fingertip.
    IndexFingerTip,
    #[allow(missing_docs)]
    MiddleFingerMcp,
    #[allow(missing_docs)]
    MiddleFingerPip,
    #[allow(missing_docs)]
    MiddleFingerDip,
    #[allow(missing_docs)]
    MiddleFingerTip,
    #[allow(missing_docs)]
    RingFingerMcp,
    #[allow(missing_docs)]
    RingFingerPip,
    #[allow(missing_docs)]
    RingFingerDip,
    #[allow(missing_docs)]
    RingFingerTip,
    #[allow(missing_docs)]
    PinkyMcp,
    #[allow(missing_docs)]
    PinkyPip,
    #[allow(missing_docs)]
    PinkyDip,
    #[allow(missing_docs)]
    PinkyTip,
}

impl HandLandmark {
    /// Number of landmarks per hand.
    pub const COUNT: usize = 21;

    /// Position of the landmark in a detector's landmark list.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A detected landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Normalized position, origin at the top-left corner, both axes in `[0, 1]`.
    pub point: Vec2,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Landmark {
    /// A landmark the detector is fully confident about.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            point: Vec2::new(x, y),
            confidence: 1.0,
        }
    }
}

/// Detector output for one hand in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandObservation {
    /// Recognized gesture.
    pub gesture: Gesture,
    /// Landmarks indexed by [`HandLandmark::index`]; may be truncated.
    pub landmarks: Vec<Landmark>,
}

impl HandObservation {
    /// The landmark at `landmark`, if the detector reported it.
    pub fn landmark(&self, landmark: HandLandmark) -> Option<&Landmark> {
        self.landmarks.get(landmark.index())
    }
}
