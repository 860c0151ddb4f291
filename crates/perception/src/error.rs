//! Perception Error Types

use thiserror::Error;

/// Errors at the perception boundary
#[derive(Debug, Clone, Error)]
pub enum PerceptionError {
    /// A provider emitted a landmark set without a required point
    #[error("landmark index {index} missing (set has {available} points)")]
    MissingLandmark { index: usize, available: usize },

    /// Frame data does not match its declared dimensions
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Two frames that must agree in size do not
    #[error("frame size mismatch: {prev_width}x{prev_height} vs {curr_width}x{curr_height}")]
    FrameMismatch {
        prev_width: u32,
        prev_height: u32,
        curr_width: u32,
        curr_height: u32,
    },

    /// Provider-side failure (malformed input, geometry failure)
    #[error("extraction failed: {0}")]
    Extraction(String),
}
