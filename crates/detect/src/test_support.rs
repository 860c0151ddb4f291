//! Shared fixtures for detector tests

use classifier::{Classifier, ClassifierError};
use perception::{
    face_idx, FaceLandmarks, FaceProvider, FlowEstimator, GrayFrame, Landmark, PerceptionError,
    PoseLandmarks, PoseProvider, VideoFrame,
};

/// Pose provider returning the same landmark set every frame
pub struct FixedPose(pub Option<PoseLandmarks>);

impl PoseProvider for FixedPose {
    fn process(&mut self, _frame: &VideoFrame) -> Result<Option<PoseLandmarks>, PerceptionError> {
        Ok(self.0.clone())
    }
}

/// Face provider returning the same landmark set every frame
pub struct FixedFace(pub Option<FaceLandmarks>);

impl FaceProvider for FixedFace {
    fn process(&mut self, _frame: &VideoFrame) -> Result<Option<FaceLandmarks>, PerceptionError> {
        Ok(self.0.clone())
    }
}

/// Flow estimator reporting a constant mean magnitude
pub struct FixedFlow(pub f64);

impl FlowEstimator for FixedFlow {
    fn mean_magnitude(&self, _prev: &GrayFrame, _curr: &GrayFrame) -> Result<f64, PerceptionError> {
        Ok(self.0)
    }
}

/// Classifier replaying a fixed output vector
pub struct FixedClassifier(pub Vec<f64>);

impl Classifier for FixedClassifier {
    fn predict(&self, _features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        Ok(self.0.clone())
    }
}

/// Classifier that always fails
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        Err(ClassifierError::Inference("model unavailable".into()))
    }
}

/// Minimal 4x4 gray RGB frame
pub fn frame_4x4() -> VideoFrame {
    VideoFrame::new(vec![128; 4 * 4 * 3], 4, 4).unwrap()
}

/// Full 33-point pose set with every point at (x, y)
pub fn pose_landmarks_at(x: f32, y: f32, visibility: f32) -> PoseLandmarks {
    PoseLandmarks::new(vec![Landmark::with_visibility(x, y, 0.0, visibility); 33])
}

/// Face-mesh set whose two eye rings produce a chosen EAR.
///
/// Each ring has horizontal extent 0.1; the lid pairs sit `ear * 0.1`
/// apart vertically, so EAR = (2 * ear * 0.1) / (2 * 0.1) = ear.
pub fn face_with_ear(ear: f32) -> FaceLandmarks {
    let mut points = vec![Landmark::new(0.0, 0.0, 0.0); 400];
    let lid = ear * 0.1;

    let rings = [
        (face_idx::LEFT_EYE_RING, 0.30f32),
        (face_idx::RIGHT_EYE_RING, 0.60f32),
    ];
    for (ring, x0) in rings {
        points[ring[0]] = Landmark::new(x0, 0.50, 0.0);
        points[ring[3]] = Landmark::new(x0 + 0.1, 0.50, 0.0);
        points[ring[1]] = Landmark::new(x0 + 0.03, 0.50 - lid / 2.0, 0.0);
        points[ring[5]] = Landmark::new(x0 + 0.03, 0.50 + lid / 2.0, 0.0);
        points[ring[2]] = Landmark::new(x0 + 0.07, 0.50 - lid / 2.0, 0.0);
        points[ring[4]] = Landmark::new(x0 + 0.07, 0.50 + lid / 2.0, 0.0);
    }
    points[face_idx::NOSE_TIP] = Landmark::new(0.50, 0.65, 0.0);
    FaceLandmarks::new(points)
}
