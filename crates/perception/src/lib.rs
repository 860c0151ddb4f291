//! Perception Boundary
//!
//! Frame types and the contracts the detectors use to talk to external
//! perception backends:
//! - Decoded video frames and grayscale conversion
//! - Body-pose and face-mesh landmark providers
//! - Optical-flow magnitude estimation
//!
//! Landmark extraction itself is out of scope; providers implement the
//! traits defined here.

mod error;
mod flow;
mod frame;
mod landmarks;
mod provider;

pub use error::PerceptionError;
pub use flow::{BlockMatchFlow, FlowEstimator};
pub use frame::{GrayFrame, VideoFrame};
pub use landmarks::{face_idx, pose_idx, FaceLandmarks, Landmark, PoseLandmarks};
pub use provider::{FaceProvider, PoseProvider, StubFaceProvider, StubPoseProvider};
