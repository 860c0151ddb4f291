//! Fixed-Capacity Sliding Window Implementation

use std::collections::VecDeque;

/// Fixed-capacity FIFO buffer of recent samples.
///
/// Pushing past capacity evicts the oldest entry; that is the normal
/// steady-state path, not an error. The buffer is owned by exactly one
/// detector instance and mutated only inside its detect call.
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> SlidingWindow<T> {
    /// Create a new window with the given capacity
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be non-zero");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest entry once full
    pub fn push(&mut self, sample: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(sample);
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fill ratio (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f64 {
        self.data.len() as f64 / self.capacity as f64
    }

    /// Iterate over all samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// The last `k` samples (or fewer, if history is shorter), oldest first
    pub fn recent(&self, k: usize) -> impl Iterator<Item = &T> {
        let skip = self.data.len().saturating_sub(k);
        self.data.iter().skip(skip)
    }

    /// Most recent sample
    pub fn back(&self) -> Option<&T> {
        self.data.back()
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
