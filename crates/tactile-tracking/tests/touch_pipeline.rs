use approx::assert_relative_eq;
use glam::{Mat4, Vec3};
use std::io::Write;

use tactile_3d::{CameraIntrinsic, ConfidenceLevel};
use tactile_image::{ConfidenceMap, DepthMap, ImageSize};
use tactile_tracking::{
    DepthFrame, FrameRecord, Gesture, HandLandmark, HandObservation, HandTrackingSettings,
    Landmark, ReplayRecord, TouchTracker, TrackingError,
};

const IMAGE_SIZE: ImageSize = ImageSize {
    width: 1920,
    height: 1440,
};

const DEPTH_SIZE: ImageSize = ImageSize {
    width: 256,
    height: 192,
};

/// A camera `height` meters above the table looking straight down.
fn overhead_frame(
    height: f32,
    fingertip_depth: f32,
) -> Result<DepthFrame, Box<dyn std::error::Error>> {
    let camera_to_world = Mat4::from_translation(Vec3::new(0.0, height, 0.0))
        * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2);

    let mut depth_map = DepthMap::from_size_val(DEPTH_SIZE, height)?;
    // the finger covers a small patch around the image center
    for row in 90..102 {
        for column in 122..134 {
            depth_map.set(column, row, fingertip_depth)?;
        }
    }

    Ok(DepthFrame {
        intrinsics: CameraIntrinsic {
            fx: 1500.0,
            fy: 1500.0,
            cx: 960.0,
            cy: 720.0,
        }
        .to_matrix(),
        image_size: IMAGE_SIZE,
        depth_map,
        confidence_map: ConfidenceMap::from_size_val(DEPTH_SIZE, ConfidenceLevel::High.raw())?,
        view_matrix: camera_to_world.inverse(),
    })
}

fn hand(tip: (f32, f32)) -> HandObservation {
    let mut landmarks = vec![Landmark::new(0.5, 0.8); HandLandmark::COUNT];
    landmarks[HandLandmark::IndexFingerDip.index()] = Landmark::new(tip.0, tip.1 + 0.02);
    landmarks[HandLandmark::IndexFingerTip.index()] = Landmark::new(tip.0, tip.1);
    HandObservation {
        gesture: Gesture::PointingUp,
        landmarks,
    }
}

#[test]
fn fingertip_touches_table() -> Result<(), Box<dyn std::error::Error>> {
    let table = tactile_3d::Plane::horizontal(0.0);
    let mut tracker = TouchTracker::default();

    let update = tracker.process(&overhead_frame(1.0, 0.97)?, &hand((0.5, 0.5)), &table)?;

    assert_relative_eq!(update.target.y, 0.03, epsilon = 1e-4);
    assert_relative_eq!(update.distance_cm, 3.0, epsilon = 1e-2);
    assert!(update.is_touching);
    // the knuckle lies on the bare table
    assert_relative_eq!(update.knuckle.map_or(f32::NAN, |k| k.y), 0.0, epsilon = 1e-4);
    Ok(())
}

#[test]
fn lifting_the_finger_ends_the_touch() -> Result<(), Box<dyn std::error::Error>> {
    let table = tactile_3d::Plane::horizontal(0.0);
    let mut tracker = TouchTracker::new(HandTrackingSettings {
        height_threshold_cm: 5.0,
        ..Default::default()
    })?;

    let touching: Vec<bool> = [0.98, 0.96, 0.9, 0.8]
        .into_iter()
        .map(|depth| -> Result<bool, Box<dyn std::error::Error>> {
            Ok(tracker
                .process(&overhead_frame(1.0, depth)?, &hand((0.5, 0.5)), &table)?
                .is_touching)
        })
        .collect::<Result<_, _>>()?;

    assert_eq!(touching, vec![true, true, false, false]);
    assert_eq!(tracker.cache().len(), 1);
    Ok(())
}

#[test]
fn dropped_frames_do_not_stop_tracking() -> Result<(), Box<dyn std::error::Error>> {
    let table = tactile_3d::Plane::horizontal(0.0);
    let mut tracker = TouchTracker::default();
    let frame = overhead_frame(1.0, 0.97)?;

    let outside = tracker.process(&frame, &hand((1.2, 0.5)), &table);
    assert!(matches!(outside, Err(TrackingError::Geometry(_))));

    let update = tracker.process(&frame, &hand((0.5, 0.5)), &table)?;
    assert!(update.is_touching);
    Ok(())
}

#[test]
fn replay_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let frame = FrameRecord::from(&overhead_frame(1.0, 0.95)?);
    let json = serde_json::json!({
        "scene": [{ "type": "horizontal_plane", "height": 0.0 }],
        "steps": [{
            "frame": frame,
            "observation": {
                "gesture": "Pointing_Up",
                "landmarks": (0..HandLandmark::COUNT)
                    .map(|_| serde_json::json!({ "x": 0.5, "y": 0.5 }))
                    .collect::<Vec<_>>(),
            },
        }],
    });

    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "{json}")?;

    let replay = ReplayRecord::from_path(file.path())?;
    let surfaces = replay.surfaces()?;
    let mut tracker = TouchTracker::default();

    for step in replay.steps {
        let frame = step.frame.into_frame()?;
        let update = tracker.process(&frame, &step.observation.into(), &surfaces)?;
        assert_eq!(update.gesture, Gesture::PointingUp);
        assert_relative_eq!(update.distance_cm, 5.0, epsilon = 1e-2);
    }
    Ok(())
}
