//! Detector configuration

use serde::{Deserialize, Serialize};

/// Access detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Presence-history capacity (~2s at 30fps)
    pub presence_window: usize,

    /// Tailgating score above this labels the frame `tailgating`
    pub tailgating_label_threshold: f64,

    /// Time-of-day score above this labels the frame `unusual_time`
    pub time_label_threshold: f64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            presence_window: 60,
            tailgating_label_threshold: 0.7,
            time_label_threshold: 0.7,
        }
    }
}

/// Behavior detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Pose-feature history capacity (~1s at 30fps)
    pub pose_window: usize,

    /// Position history capacity (~10s at 30fps)
    pub position_window: usize,

    /// Loitering score above this labels the frame `loitering`
    pub loitering_label_threshold: f64,

    /// Swaying score above this labels the frame `potential_intoxication`
    pub swaying_label_threshold: f64,

    /// Pose-feature sequence length fed to a learned classifier
    pub classifier_sequence_len: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            pose_window: 30,
            position_window: 300,
            loitering_label_threshold: 0.7,
            swaying_label_threshold: 0.6,
            classifier_sequence_len: 10,
        }
    }
}

/// Drowsiness detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrowsinessConfig {
    /// EAR and head-pose history capacity (~1s at 30fps)
    pub history_window: usize,

    /// EAR above this (with a stable head) counts as active and resets
    /// the inactivity timer
    pub active_ear: f64,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            history_window: 30,
            active_ear: 0.25,
        }
    }
}

/// Fight detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FightConfig {
    /// Grayscale frame history capacity
    pub frame_window: usize,

    /// Frames are downscaled so the larger dimension is at most this
    /// before optical flow
    pub flow_max_dim: u32,

    /// Bounding-box padding, pixels
    pub box_padding: u32,

    /// Landmarks below this visibility are excluded from the box
    pub visibility_threshold: f32,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            frame_window: 10,
            flow_max_dim: 480,
            box_padding: 20,
            visibility_threshold: 0.5,
        }
    }
}
