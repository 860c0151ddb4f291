//! Sliding-Window History
//!
//! Provides a fixed-capacity FIFO buffer for recent per-frame samples,
//! used by the detectors for temporal statistics.

mod window;

pub use window::SlidingWindow;
