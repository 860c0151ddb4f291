//! Behavior detector: loitering and intoxication-like swaying

use perception::{pose_idx, PoseLandmarks, PoseProvider, VideoFrame};
use sliding_window::SlidingWindow;
use tracing::{debug, info};

use crate::config::BehaviorConfig;
use crate::fusion::{self, Scoring};
use crate::result::{Category, DetectionResult};
use crate::score::{self, PoseFeature, POSE_FEATURE_LEN};
use crate::{DetectError, Detector};

/// Pose points entering the behavior feature vector, in layout order
const FEATURE_POINTS: [usize; 9] = [
    pose_idx::NOSE,
    pose_idx::LEFT_EYE,
    pose_idx::RIGHT_EYE,
    pose_idx::LEFT_SHOULDER,
    pose_idx::RIGHT_SHOULDER,
    pose_idx::LEFT_HIP,
    pose_idx::RIGHT_HIP,
    pose_idx::LEFT_ANKLE,
    pose_idx::RIGHT_ANKLE,
];

/// Detects unusual behavior from pose and position histories.
///
/// A short pose-feature window feeds the swaying score; a long
/// hip-center window feeds the loitering score.
pub struct BehaviorDetector {
    config: BehaviorConfig,
    pose: Box<dyn PoseProvider>,
    scoring: Scoring,
    pose_features: SlidingWindow<PoseFeature>,
    positions: SlidingWindow<(f64, f64)>,
}

impl BehaviorDetector {
    pub fn new(config: BehaviorConfig, pose: Box<dyn PoseProvider>, scoring: Scoring) -> Self {
        info!(mode = scoring.mode_name(), "behavior detector ready");
        Self {
            pose_features: SlidingWindow::new(config.pose_window),
            positions: SlidingWindow::new(config.position_window),
            config,
            pose,
            scoring,
        }
    }

    /// 9-point (x, y, z) feature vector in the scorer's layout
    fn extract_features(landmarks: &PoseLandmarks) -> Result<PoseFeature, DetectError> {
        let mut features = [0.0; POSE_FEATURE_LEN];
        for (i, &idx) in FEATURE_POINTS.iter().enumerate() {
            let point = landmarks.point(idx)?;
            features[i * 3] = point.x as f64;
            features[i * 3 + 1] = point.y as f64;
            features[i * 3 + 2] = point.z as f64;
        }
        Ok(features)
    }

    /// Hip-center position, the loitering signal
    fn position(landmarks: &PoseLandmarks) -> Result<(f64, f64), DetectError> {
        let left = landmarks.point(pose_idx::LEFT_HIP)?;
        let right = landmarks.point(pose_idx::RIGHT_HIP)?;
        Ok((
            (left.x as f64 + right.x as f64) / 2.0,
            (left.y as f64 + right.y as f64) / 2.0,
        ))
    }
}

impl Detector for BehaviorDetector {
    fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionResult, DetectError> {
        let Some(landmarks) = self.pose.process(frame)? else {
            return Ok(DetectionResult::empty(Category::None));
        };

        // extract everything before touching any window
        let features = Self::extract_features(&landmarks)?;
        let position = Self::position(&landmarks)?;

        self.pose_features.push(features);
        self.positions.push(position);

        let positions: Vec<(f64, f64)> = self.positions.iter().copied().collect();
        let poses: Vec<PoseFeature> = self.pose_features.iter().copied().collect();

        let loitering = score::loitering_score(&positions);
        let swaying = score::swaying_score(&poses);
        debug!(loitering, swaying, "behavior scores");

        let mut category = if loitering > self.config.loitering_label_threshold {
            Category::Loitering
        } else if swaying > self.config.swaying_label_threshold {
            Category::PotentialIntoxication
        } else {
            Category::None
        };

        let decision = match &self.scoring {
            Scoring::Rules => fusion::behavior_rule_fusion(loitering, swaying),
            Scoring::Learned(model)
                if self.pose_features.len() >= self.config.classifier_sequence_len =>
            {
                let sequence: Vec<f64> = self
                    .pose_features
                    .recent(self.config.classifier_sequence_len)
                    .flat_map(|p| p.iter().copied())
                    .collect();
                let outputs = model.predict(&sequence)?;
                // outputs beyond the first rank the category labels
                if outputs.len() > 1 {
                    if let Some(best) = fusion::argmax(&outputs[1..]) {
                        category = [
                            Category::Loitering,
                            Category::PotentialIntoxication,
                            Category::SuspiciousInteraction,
                        ][best.min(2)];
                    }
                }
                fusion::learned_decision(&outputs)
            }
            // learned mode with too little history scores like the rules
            Scoring::Learned(_) => fusion::behavior_rule_fusion(loitering, swaying),
        };

        let mut result = DetectionResult::empty(category)
            .with_detail("loitering_score", loitering)
            .with_detail("swaying_score", swaying);
        result.detected = decision.detected;
        result.confidence = decision.confidence;
        result.person_count = 1;
        Ok(result)
    }

    fn reset(&mut self) {
        self.pose_features.clear();
        self.positions.clear();
    }
}
