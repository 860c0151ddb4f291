//! Perception provider contracts

use crate::{FaceLandmarks, PerceptionError, PoseLandmarks, VideoFrame};
use tracing::warn;

/// Body-pose landmark provider.
///
/// `Ok(None)` means "no person in frame" and is an ordinary result,
/// distinct from an extraction failure.
pub trait PoseProvider: Send {
    fn process(&mut self, frame: &VideoFrame) -> Result<Option<PoseLandmarks>, PerceptionError>;
}

/// Face-mesh landmark provider.
pub trait FaceProvider: Send {
    fn process(&mut self, frame: &VideoFrame) -> Result<Option<FaceLandmarks>, PerceptionError>;
}

/// Pose provider that never detects anyone.
///
/// Lets the server come up without a perception backend wired in.
pub struct StubPoseProvider;

impl StubPoseProvider {
    pub fn new() -> Self {
        warn!("no pose backend configured, using stub provider (never detects)");
        Self
    }
}

impl Default for StubPoseProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseProvider for StubPoseProvider {
    fn process(&mut self, _frame: &VideoFrame) -> Result<Option<PoseLandmarks>, PerceptionError> {
        Ok(None)
    }
}

/// Face provider that never detects anyone.
pub struct StubFaceProvider;

impl StubFaceProvider {
    pub fn new() -> Self {
        warn!("no face backend configured, using stub provider (never detects)");
        Self
    }
}

impl Default for StubFaceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceProvider for StubFaceProvider {
    fn process(&mut self, _frame: &VideoFrame) -> Result<Option<FaceLandmarks>, PerceptionError> {
        Ok(None)
    }
}
