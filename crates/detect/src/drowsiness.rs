//! Drowsiness detector: eye closure, head nodding, inactivity

use std::time::Instant;

use perception::{face_idx, FaceLandmarks, FaceProvider, VideoFrame};
use sliding_window::SlidingWindow;
use tracing::{debug, info};

use crate::config::DrowsinessConfig;
use crate::fusion::{self, Scoring};
use crate::result::{Category, DetectionResult};
use crate::{score, DetectError, Detector};

/// [eye-line angle, head-tilt angle] in radians
type HeadPose = [f64; 2];

/// Detects operator drowsiness from face-mesh landmarks.
///
/// Tracks EAR and head-pose histories plus a last-active timestamp that
/// resets whenever the eyes are open and the head is stable.
pub struct DrowsinessDetector {
    config: DrowsinessConfig,
    face: Box<dyn FaceProvider>,
    scoring: Scoring,
    ear_history: SlidingWindow<f64>,
    head_pose_history: SlidingWindow<HeadPose>,
    last_active: Instant,
}

impl DrowsinessDetector {
    pub fn new(config: DrowsinessConfig, face: Box<dyn FaceProvider>, scoring: Scoring) -> Self {
        info!(mode = scoring.mode_name(), "drowsiness detector ready");
        Self {
            ear_history: SlidingWindow::new(config.history_window),
            head_pose_history: SlidingWindow::new(config.history_window),
            config,
            face,
            scoring,
            last_active: Instant::now(),
        }
    }
}

/// EAR for one eye from its 6-point ring: (v1 + v2) / (2h + eps).
///
/// Point order: outer corner, two upper lid, inner corner, two lower lid.
pub fn eye_aspect_ratio(eye: &[(f64, f64); 6]) -> f64 {
    let dist = |a: (f64, f64), b: (f64, f64)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
    let v1 = dist(eye[1], eye[5]);
    let v2 = dist(eye[2], eye[4]);
    let h = dist(eye[0], eye[3]);
    (v1 + v2) / (2.0 * h + 1e-6)
}

fn eye_ring(face: &FaceLandmarks, ring: &[usize; 6]) -> Result<[(f64, f64); 6], DetectError> {
    let mut points = [(0.0, 0.0); 6];
    for (slot, &idx) in points.iter_mut().zip(ring) {
        let p = face.point(idx)?;
        *slot = (p.x as f64, p.y as f64);
    }
    Ok(points)
}

/// Average EAR across both eyes
pub fn average_ear(face: &FaceLandmarks) -> Result<f64, DetectError> {
    let left = eye_aspect_ratio(&eye_ring(face, &face_idx::LEFT_EYE_RING)?);
    let right = eye_aspect_ratio(&eye_ring(face, &face_idx::RIGHT_EYE_RING)?);
    Ok((left + right) / 2.0)
}

/// [eye-line angle, head-tilt angle] from eye corners and nose tip
pub fn head_pose_angles(face: &FaceLandmarks) -> Result<HeadPose, DetectError> {
    let left = face.point(face_idx::LEFT_EYE_OUTER)?;
    let right = face.point(face_idx::RIGHT_EYE_OUTER)?;
    let nose = face.point(face_idx::NOSE_TIP)?;

    let eye_angle = (right.y as f64 - left.y as f64).atan2(right.x as f64 - left.x as f64);

    let mid_x = (left.x as f64 + right.x as f64) / 2.0;
    let mid_y = (left.y as f64 + right.y as f64) / 2.0;
    let head_tilt = (nose.y as f64 - mid_y).atan2(nose.x as f64 - mid_x);

    Ok([eye_angle, head_tilt])
}

impl Detector for DrowsinessDetector {
    fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionResult, DetectError> {
        let Some(face) = self.face.process(frame)? else {
            return Ok(DetectionResult::empty(Category::None));
        };

        // extract everything before touching any window
        let ear = average_ear(&face)?;
        let head_pose = head_pose_angles(&face)?;

        self.ear_history.push(ear);
        self.head_pose_history.push(head_pose);

        let tilts: Vec<f64> = self.head_pose_history.iter().map(|p| p[1]).collect();
        let nodding = score::head_nodding(&tilts);

        // inactivity is reported as of this frame; the reset below only
        // affects the next one
        let inactivity = self.last_active.elapsed().as_secs_f64();
        if ear > self.config.active_ear && !nodding {
            self.last_active = Instant::now();
        }
        debug!(ear, nodding, inactivity, "drowsiness signals");

        let decision = match &self.scoring {
            Scoring::Rules => fusion::drowsiness_rule_fusion(ear, nodding, inactivity),
            Scoring::Learned(model) => {
                let features = [ear, head_pose[0], head_pose[1], inactivity];
                fusion::learned_decision(&model.predict(&features)?)
            }
        };

        let mut result = DetectionResult::empty(if decision.detected {
            Category::Drowsy
        } else {
            Category::None
        })
        .with_detail("eye_closure_ratio", ear)
        .with_detail("head_nodding", if nodding { 1.0 } else { 0.0 })
        .with_detail("inactivity_duration", inactivity);
        result.detected = decision.detected;
        result.confidence = decision.confidence;
        result.person_count = 1;
        Ok(result)
    }

    fn reset(&mut self) {
        self.ear_history.clear();
        self.head_pose_history.clear();
        self.last_active = Instant::now();
    }
}
