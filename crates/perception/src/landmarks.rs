//! Landmark sets emitted by perception providers
//!
//! Index conventions follow the MediaPipe pose and face-mesh topologies,
//! which every supported provider emits.

use crate::PerceptionError;
use serde::{Deserialize, Serialize};

/// A named 2D/3D coordinate on a detected body or face.
///
/// Coordinates are normalized to [0, 1] relative to the frame;
/// `visibility` is provider-dependent and may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Landmark without a visibility score
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
        }
    }

    /// Landmark with a visibility score
    pub fn with_visibility(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }
}

/// Body-pose landmark indices (MediaPipe pose topology, 33 points)
pub mod pose_idx {
    pub const NOSE: usize = 0;
    pub const LEFT_EYE: usize = 2;
    pub const RIGHT_EYE: usize = 5;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;

    /// Number of points in a full pose set
    pub const POINT_COUNT: usize = 33;
}

/// Face-mesh landmark indices (MediaPipe face-mesh topology)
pub mod face_idx {
    /// Nose tip
    pub const NOSE_TIP: usize = 4;
    /// Outer corner of the left eye (doubles as left eye center proxy)
    pub const LEFT_EYE_OUTER: usize = 33;
    /// Outer corner of the right eye
    pub const RIGHT_EYE_OUTER: usize = 263;

    /// Left eye ring: outer corner, two upper lid, inner corner, two lower lid
    pub const LEFT_EYE_RING: [usize; 6] = [33, 160, 158, 133, 153, 144];
    /// Right eye ring, same ordering convention
    pub const RIGHT_EYE_RING: [usize; 6] = [362, 385, 387, 263, 373, 380];
}

/// Full-body pose landmark set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseLandmarks {
    pub points: Vec<Landmark>,
}

impl PoseLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Point at a pose index, error when the provider emitted a short set
    pub fn point(&self, index: usize) -> Result<&Landmark, PerceptionError> {
        self.points.get(index).ok_or(PerceptionError::MissingLandmark {
            index,
            available: self.points.len(),
        })
    }

    /// Iterate over all points
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }
}

/// Face-mesh landmark set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub points: Vec<Landmark>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Point at a face-mesh index, error when the set is too short
    pub fn point(&self, index: usize) -> Result<&Landmark, PerceptionError> {
        self.points.get(index).ok_or(PerceptionError::MissingLandmark {
            index,
            available: self.points.len(),
        })
    }
}
