//! Fight detector: motion intensity plus pose

use perception::{pose_idx, FlowEstimator, GrayFrame, PoseLandmarks, PoseProvider, VideoFrame};
use sliding_window::SlidingWindow;
use tracing::{debug, info};

use crate::config::FightConfig;
use crate::fusion::{self, Scoring};
use crate::result::{BoundingBox, Category, DetectionResult};
use crate::{score, DetectError, Detector};

/// Joints entering the fight feature vector: wrists, elbows, shoulders, hips
const JOINT_POINTS: [usize; 8] = [
    pose_idx::LEFT_WRIST,
    pose_idx::RIGHT_WRIST,
    pose_idx::LEFT_ELBOW,
    pose_idx::RIGHT_ELBOW,
    pose_idx::LEFT_SHOULDER,
    pose_idx::RIGHT_SHOULDER,
    pose_idx::LEFT_HIP,
    pose_idx::RIGHT_HIP,
];

/// Floats per joint feature vector: 8 joints x (x, y, z)
const JOINT_FEATURE_LEN: usize = 24;

/// Detects physical altercations from frame-to-frame motion.
///
/// Keeps a short grayscale frame window for optical flow; pose features
/// are taken from the most recent frame only.
pub struct FightDetector {
    config: FightConfig,
    pose: Box<dyn PoseProvider>,
    flow: Box<dyn FlowEstimator>,
    scoring: Scoring,
    frames: SlidingWindow<GrayFrame>,
}

impl FightDetector {
    pub fn new(
        config: FightConfig,
        pose: Box<dyn PoseProvider>,
        flow: Box<dyn FlowEstimator>,
        scoring: Scoring,
    ) -> Self {
        info!(mode = scoring.mode_name(), "fight detector ready");
        Self {
            frames: SlidingWindow::new(config.frame_window),
            config,
            pose,
            flow,
            scoring,
        }
    }

    /// 8-joint (x, y, z) feature vector from the current pose
    fn joint_features(landmarks: &PoseLandmarks) -> Result<[f64; JOINT_FEATURE_LEN], DetectError> {
        let mut features = [0.0; JOINT_FEATURE_LEN];
        for (i, &idx) in JOINT_POINTS.iter().enumerate() {
            let point = landmarks.point(idx)?;
            features[i * 3] = point.x as f64;
            features[i * 3 + 1] = point.y as f64;
            features[i * 3 + 2] = point.z as f64;
        }
        Ok(features)
    }

    /// Pixel box around sufficiently visible landmarks, padded and
    /// clamped to the frame. `None` when nothing passes the filter.
    fn person_box(&self, landmarks: &PoseLandmarks, width: u32, height: u32) -> Option<BoundingBox> {
        let mut extent: Option<(f32, f32, f32, f32)> = None;
        for point in landmarks.iter() {
            if point.visibility.unwrap_or(0.0) <= self.config.visibility_threshold {
                continue;
            }
            extent = Some(match extent {
                None => (point.x, point.y, point.x, point.y),
                Some((x0, y0, x1, y1)) => (
                    x0.min(point.x),
                    y0.min(point.y),
                    x1.max(point.x),
                    y1.max(point.y),
                ),
            });
        }
        let (x0, y0, x1, y1) = extent?;

        let pad = self.config.box_padding;
        let to_px = |v: f32, scale: u32| (v.clamp(0.0, 1.0) * scale as f32) as u32;
        Some(BoundingBox {
            x_min: to_px(x0, width).saturating_sub(pad),
            y_min: to_px(y0, height).saturating_sub(pad),
            x_max: (to_px(x1, width) + pad).min(width),
            y_max: (to_px(y1, height) + pad).min(height),
        })
    }
}

impl Detector for FightDetector {
    fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionResult, DetectError> {
        let Some(landmarks) = self.pose.process(frame)? else {
            return Ok(DetectionResult::empty(Category::None));
        };

        let features = Self::joint_features(&landmarks)?;
        let gray = frame.to_grayscale().downscale(self.config.flow_max_dim)?;

        // flow against the previous frame happens before the push so a
        // failure leaves the window untouched
        let mean_magnitude = match self.frames.back() {
            Some(prev) => self.flow.mean_magnitude(prev, &gray)?,
            None => 0.0,
        };
        self.frames.push(gray);

        let motion = score::motion_score(mean_magnitude);
        debug!(motion, "fight motion score");

        let decision = match &self.scoring {
            Scoring::Rules => fusion::fight_rule_fusion(motion),
            Scoring::Learned(model) => {
                let mut input = features.to_vec();
                input.push(motion);
                fusion::learned_decision(&model.predict(&input)?)
            }
        };

        let boxes: Vec<BoundingBox> = self
            .person_box(&landmarks, frame.width, frame.height)
            .into_iter()
            .collect();

        let mut result = DetectionResult::empty(if decision.detected {
            Category::Fight
        } else {
            Category::None
        })
        .with_detail("motion_score", motion);
        result.detected = decision.detected;
        result.confidence = decision.confidence;
        result.person_count = boxes.len() as u32;
        result.bounding_boxes = boxes;
        Ok(result)
    }

    fn reset(&mut self) {
        self.frames.clear();
    }
}
