//! Windowed Statistics
//!
//! Scalar statistics over sliding-window contents, shared by the
//! detector scoring functions.

mod stats;

pub use stats::{clamp01, mean, Extent2D, WindowStats};
