//! Security Event Detection
//!
//! Per-frame anomaly detection for security camera streams:
//! - Unauthorized access (tailgating, unusual-hour entry)
//! - Behavior anomalies (loitering, intoxication-like swaying)
//! - Operator drowsiness (eye closure, head nodding, inactivity)
//! - Physical altercation (motion intensity, pose)
//!
//! Each detector is a long-lived stateful facade over bounded sliding
//! windows of extracted features. Scores are derived from windowed
//! statistics and fused into a decision either by fixed rules or by an
//! optional pretrained classifier, chosen once at construction.

pub mod access;
pub mod behavior;
pub mod config;
pub mod drowsiness;
pub mod fight;
pub mod fusion;
pub mod result;
pub mod score;

#[cfg(test)]
pub(crate) mod test_support;

pub use access::AccessDetector;
pub use behavior::BehaviorDetector;
pub use config::{AccessConfig, BehaviorConfig, DrowsinessConfig, FightConfig};
pub use drowsiness::DrowsinessDetector;
pub use fight::FightDetector;
pub use fusion::{Decision, Scoring};
pub use result::{BoundingBox, Category, DetectionResult};

use classifier::ClassifierError;
use perception::{PerceptionError, VideoFrame};
use thiserror::Error;

/// Detection error types.
///
/// "No subject in frame" is not an error; it produces an ordinary empty
/// result. Errors here mean the frame could not be evaluated at all, and
/// no window was mutated for it.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("feature extraction failed: {0}")]
    Extraction(#[from] PerceptionError),

    #[error("classifier invocation failed: {0}")]
    Classifier(#[from] ClassifierError),
}

/// A per-category detector processing one frame at a time.
///
/// Not safe for concurrent frame submission; one instance serves one
/// logical camera stream.
pub trait Detector: Send {
    /// Evaluate one decoded frame, updating temporal state
    fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionResult, DetectError>;

    /// Drop all temporal state (on stream change)
    fn reset(&mut self);
}
