//! Access detector: tailgating and unusual-hour entry

use chrono::{Local, Timelike};
use perception::{PoseProvider, VideoFrame};
use sliding_window::SlidingWindow;
use tracing::{debug, info};

use crate::config::AccessConfig;
use crate::fusion::{self, Scoring};
use crate::result::{Category, DetectionResult};
use crate::{score, DetectError, Detector};

/// Detects unauthorized access from presence history and time of day.
///
/// Presence per frame is a 0/1 flag from the pose provider; multi-person
/// counting is out of scope.
pub struct AccessDetector {
    config: AccessConfig,
    pose: Box<dyn PoseProvider>,
    scoring: Scoring,
    presence: SlidingWindow<f64>,
}

impl AccessDetector {
    pub fn new(config: AccessConfig, pose: Box<dyn PoseProvider>, scoring: Scoring) -> Self {
        info!(mode = scoring.mode_name(), "access detector ready");
        Self {
            presence: SlidingWindow::new(config.presence_window),
            config,
            pose,
            scoring,
        }
    }

    /// Evaluate a frame against an explicit hour-of-day.
    ///
    /// `detect` uses the local clock; this entry point exists because the
    /// time-of-day score must stay deterministic under test.
    pub fn detect_at_hour(
        &mut self,
        frame: &VideoFrame,
        hour: u32,
    ) -> Result<DetectionResult, DetectError> {
        let Some(_landmarks) = self.pose.process(frame)? else {
            return Ok(DetectionResult::empty(Category::Normal));
        };
        let person_count: u32 = 1;

        self.presence.push(person_count as f64);
        let history: Vec<f64> = self.presence.iter().copied().collect();

        let tailgating = score::tailgating_score(&history);
        let time = score::time_of_day_score(hour);
        debug!(tailgating, time, "access scores");

        let category = if tailgating > self.config.tailgating_label_threshold {
            Category::Tailgating
        } else if time > self.config.time_label_threshold {
            Category::UnusualTime
        } else {
            Category::Normal
        };

        let decision = match &self.scoring {
            Scoring::Rules => fusion::access_rule_fusion(person_count, tailgating, time),
            Scoring::Learned(model) => {
                let features = [person_count as f64, tailgating, time];
                fusion::learned_decision(&model.predict(&features)?)
            }
        };

        let mut result = DetectionResult::empty(category)
            .with_detail("tailgating_score", tailgating)
            .with_detail("time_based_score", time);
        result.detected = decision.detected;
        result.confidence = decision.confidence;
        result.person_count = person_count;
        Ok(result)
    }
}

impl Detector for AccessDetector {
    fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionResult, DetectError> {
        let hour = Local::now().hour();
        self.detect_at_hour(frame, hour)
    }

    fn reset(&mut self) {
        self.presence.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        frame_4x4, pose_landmarks_at, FailingClassifier, FixedClassifier, FixedPose,
    };

    fn rule_detector(present: bool) -> AccessDetector {
        let landmarks = present.then(|| pose_landmarks_at(0.5, 0.5, 0.9));
        AccessDetector::new(
            AccessConfig::default(),
            Box::new(FixedPose(landmarks)),
            Scoring::Rules,
        )
    }

    #[test]
    fn test_nobody_in_frame_is_neutral() {
        let mut detector = rule_detector(false);
        let result = detector.detect(&frame_4x4()).unwrap();
        assert!(!result.detected);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.category, Category::Normal);
        assert_eq!(result.person_count, 0);
        // the miss must not touch the history
        assert_eq!(detector.presence.len(), 0);
    }

    #[test]
    fn test_steady_presence_daytime_is_normal() {
        let mut detector = rule_detector(true);
        let frame = frame_4x4();
        let mut result = detector.detect_at_hour(&frame, 12).unwrap();
        for _ in 0..40 {
            result = detector.detect_at_hour(&frame, 12).unwrap();
        }
        assert!(!result.detected);
        assert_eq!(result.category, Category::Normal);
        assert_eq!(result.details["tailgating_score"], 0.0);
        assert_eq!(result.details["time_based_score"], 0.1);
        assert!((result.confidence - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_late_night_presence_flagged_unusual_time() {
        let mut detector = rule_detector(true);
        let frame = frame_4x4();
        let mut result = detector.detect_at_hour(&frame, 23).unwrap();
        for _ in 0..40 {
            result = detector.detect_at_hour(&frame, 23).unwrap();
        }
        assert_eq!(result.category, Category::UnusualTime);
        assert_eq!(result.details["time_based_score"], 0.8);
        // 0.3 * 0.8 alone stays below the decision threshold
        assert!(!result.detected);
    }

    #[test]
    fn test_window_respects_capacity() {
        let mut detector = rule_detector(true);
        let frame = frame_4x4();
        for _ in 0..200 {
            detector.detect_at_hour(&frame, 12).unwrap();
        }
        assert_eq!(detector.presence.len(), 60);
    }

    #[test]
    fn test_learned_mode_owns_the_decision() {
        let landmarks = Some(pose_landmarks_at(0.5, 0.5, 0.9));
        let mut detector = AccessDetector::new(
            AccessConfig::default(),
            Box::new(FixedPose(landmarks)),
            Scoring::Learned(Box::new(FixedClassifier(vec![0.9]))),
        );
        let result = detector.detect_at_hour(&frame_4x4(), 12).unwrap();
        assert!(result.detected);
        assert_eq!(result.confidence, 0.9);
        // rule scores still reported as diagnostics
        assert!(result.details.contains_key("tailgating_score"));
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let landmarks = Some(pose_landmarks_at(0.5, 0.5, 0.9));
        let mut detector = AccessDetector::new(
            AccessConfig::default(),
            Box::new(FixedPose(landmarks)),
            Scoring::Learned(Box::new(FailingClassifier)),
        );
        let err = detector.detect_at_hour(&frame_4x4(), 12).unwrap_err();
        assert!(matches!(err, DetectError::Classifier(_)));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut detector = rule_detector(true);
        let frame = frame_4x4();
        for _ in 0..10 {
            detector.detect_at_hour(&frame, 12).unwrap();
        }
        detector.reset();
        assert_eq!(detector.presence.len(), 0);
    }
}
